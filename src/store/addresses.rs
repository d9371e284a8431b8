//! Saved-address actions. "At most one default" is enforced by clearing
//! other defaults before insert, not by a backend constraint.

use crate::gateway::{collections, DataGateway, Filter, IdentityGateway};
use crate::models::{Address, AddressDraft};
use crate::store::{deserialize_rows, Store};
use crate::utils::generate_record_id;
use serde_json::json;

impl<G: DataGateway + IdentityGateway> Store<G> {
    /// Persists a new address for the signed-in user and refreshes the
    /// cached list. Returns the new address id.
    pub async fn add_address(&mut self, draft: AddressDraft) -> Option<String> {
        let Some(user) = self.user.clone() else {
            self.notices.error("Please login to save addresses");
            return None;
        };

        // Clear any existing default first so the new one is unique.
        if draft.is_default {
            if let Err(e) = self
                .gateway
                .update(
                    collections::ADDRESSES,
                    &[Filter::eq("user_id", user.id.clone())],
                    json!({ "isDefault": false }),
                )
                .await
            {
                log::error!("Failed to clear default addresses: {e}");
                self.notices.error("Failed to add address");
                return None;
            }
        }

        let address = Address {
            id: generate_record_id("addr"),
            user_id: Some(user.id.clone()),
            name: draft.name,
            street: draft.street,
            city: draft.city,
            state: draft.state,
            zip: draft.zip,
            phone: draft.phone,
            kind: draft.kind,
            is_default: draft.is_default,
        };
        let row = match serde_json::to_value(&address) {
            Ok(row) => row,
            Err(e) => {
                log::error!("Failed to serialize address: {e}");
                return None;
            }
        };

        match self.gateway.insert(collections::ADDRESSES, row).await {
            Ok(()) => {
                self.refresh_addresses().await;
                self.notices.success("Address added");
                Some(address.id)
            }
            Err(e) => {
                log::error!("Failed to add address: {e}");
                self.notices.error("Failed to add address");
                None
            }
        }
    }

    pub async fn update_address(&mut self, id: &str, updated: Address) -> bool {
        let changes = match serde_json::to_value(&updated) {
            Ok(changes) => changes,
            Err(e) => {
                log::error!("Failed to serialize address: {e}");
                return false;
            }
        };
        match self
            .gateway
            .update(collections::ADDRESSES, &[Filter::eq("id", id)], changes)
            .await
        {
            Ok(()) => {
                self.refresh_addresses().await;
                self.notices.success("Address updated");
                true
            }
            Err(e) => {
                log::error!("Failed to update address {id}: {e}");
                self.notices.error("Failed to update address");
                false
            }
        }
    }

    pub async fn remove_address(&mut self, id: &str) -> bool {
        match self
            .gateway
            .delete(collections::ADDRESSES, &[Filter::eq("id", id)])
            .await
        {
            Ok(()) => {
                self.addresses.retain(|a| a.id != id);
                self.notices.success("Address removed");
                true
            }
            Err(e) => {
                log::error!("Failed to remove address {id}: {e}");
                self.notices.error("Failed to remove address");
                false
            }
        }
    }

    /// Saved address picked as the checkout pre-fill, preferring the
    /// default one.
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|a| a.is_default)
            .or_else(|| self.addresses.first())
    }

    async fn refresh_addresses(&mut self) {
        match self.gateway.select(collections::ADDRESSES, &[]).await {
            Ok(rows) => self.addresses = deserialize_rows(rows, collections::ADDRESSES),
            Err(e) => log::error!("Failed to refresh addresses: {e}"),
        }
    }
}
