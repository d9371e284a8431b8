//! Authentication actions: portal-aware login, customer and distributor
//! registration, logout and password management. Role checks happen here,
//! after the identity service accepted the credentials — a valid password
//! for the wrong portal is force-signed-out.

use crate::gateway::{collections, DataGateway, Filter, IdentityGateway};
use crate::models::{Profile, Role, User};
use crate::store::Store;
use crate::utils::{generate_coupon_code, generate_record_id};
use serde_json::json;

impl<G: DataGateway + IdentityGateway> Store<G> {
    /// Signs in and verifies the profile role against the portal the user
    /// came through. A customer credential presented to the admin or
    /// distributor portal is rejected and the session is torn down again.
    pub async fn login(&mut self, username: &str, password: &str, expected_role: Role) -> bool {
        let session = match self.gateway.sign_in_with_password(username, password).await {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Login failed for {username}: {e}");
                self.notices.error("Invalid username or password");
                return false;
            }
        };

        let user = self.resolve_user(&session.user_id, &session.email).await;
        // Only the privileged portals demand a matching profile role; the
        // customer storefront accepts any valid credential.
        let privileged = matches!(expected_role, Role::Admin | Role::Distributor);
        if privileged && user.role != expected_role {
            log::warn!(
                "Role mismatch for {username}: expected {expected_role:?}, profile says {:?}",
                user.role
            );
            if let Err(e) = self.gateway.sign_out().await {
                log::error!("Failed to sign out after role mismatch: {e}");
            }
            self.notices
                .error("This account is not authorized for this portal");
            return false;
        }

        self.user = Some(user);
        self.fetch_user_data().await;
        self.notices.success("Logged in successfully");
        true
    }

    /// Creates an identity account and its customer profile row. A profile
    /// insert failure after a successful sign-up is logged but not rolled
    /// back; the session resolves to a bare customer until repaired.
    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> bool {
        let session = match self.gateway.sign_up(email, password).await {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Registration failed for {email}: {e}");
                self.notices.error("Registration failed");
                return false;
            }
        };

        let profile = Profile {
            id: session.user_id.clone(),
            email: email.to_string(),
            name: Some(name.to_string()),
            role: Role::Customer,
            distributor_id: None,
        };
        self.insert_profile(&profile).await;

        self.user = Some(User::from(profile));
        self.fetch_user_data().await;
        self.notices.success("Account created");
        true
    }

    /// Distributor self-registration: identity account, distributor row
    /// with a synthesized coupon code, and a distributor-role profile
    /// linking the two. Partial failure leaves the account usable and is
    /// surfaced as a warning.
    pub async fn register_distributor(
        &mut self,
        name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> bool {
        let session = match self.gateway.sign_up(email, password).await {
            Ok(session) => session,
            Err(e) => {
                log::warn!("Distributor registration failed for {email}: {e}");
                self.notices.error("Registration failed");
                return false;
            }
        };

        let distributor_id = generate_record_id("dist");
        let coupon_code = generate_coupon_code(name);
        let row = json!({
            "id": distributor_id,
            "name": name,
            "email": email,
            "phone": phone,
            "couponCode": coupon_code,
            "isActive": true,
        });
        let mut partial = false;
        if let Err(e) = self.gateway.insert(collections::DISTRIBUTORS, row).await {
            log::error!("Failed to create distributor record for {email}: {e}");
            partial = true;
        }

        let profile = Profile {
            id: session.user_id.clone(),
            email: email.to_string(),
            name: Some(name.to_string()),
            role: Role::Distributor,
            distributor_id: (!partial).then(|| distributor_id.clone()),
        };
        self.insert_profile(&profile).await;

        self.user = Some(User::from(profile));
        self.fetch_user_data().await;
        if partial {
            self.notices
                .warning("Account created, but distributor setup is incomplete");
        } else {
            self.notices
                .success(format!("Welcome aboard! Your coupon code is {coupon_code}"));
        }
        true
    }

    /// Signs out and drops all private state.
    pub async fn logout(&mut self) {
        if let Err(e) = self.gateway.sign_out().await {
            log::error!("Sign-out failed: {e}");
        }
        self.user = None;
        self.wishlist.clear();
        self.addresses.clear();
        self.orders.clear();
        self.notices.info("Logged out successfully");
    }

    pub async fn update_password(&mut self, new_password: &str) -> bool {
        match self.gateway.update_password(new_password).await {
            Ok(()) => {
                self.notices.success("Password updated");
                true
            }
            Err(e) => {
                log::error!("Password update failed: {e}");
                self.notices.error("Failed to update password");
                false
            }
        }
    }

    pub async fn reset_password_for_email(&mut self, email: &str) -> bool {
        match self.gateway.reset_password_for_email(email).await {
            Ok(()) => {
                self.notices
                    .success("Password reset email sent if the account exists");
                true
            }
            Err(e) => {
                log::error!("Password reset failed for {email}: {e}");
                self.notices.error("Failed to send reset email");
                false
            }
        }
    }

    /// Admin-console profile edit; patches the profile row and both cached
    /// rosters.
    pub async fn update_customer(&mut self, id: &str, name: &str) -> bool {
        match self
            .gateway
            .update(
                collections::PROFILES,
                &[Filter::eq("id", id)],
                json!({ "name": name }),
            )
            .await
        {
            Ok(()) => {
                if let Some(customer) = self.customers.iter_mut().find(|c| c.id == id) {
                    customer.name = name.to_string();
                }
                if let Some(user) = self.users.iter_mut().find(|u| u.id == id) {
                    user.name = Some(name.to_string());
                }
                self.notices.success("Customer updated");
                true
            }
            Err(e) => {
                log::error!("Failed to update profile {id}: {e}");
                self.notices.error("Failed to update customer");
                false
            }
        }
    }

    async fn insert_profile(&mut self, profile: &Profile) {
        let row = match serde_json::to_value(profile) {
            Ok(row) => row,
            Err(e) => {
                log::error!("Failed to serialize profile: {e}");
                return;
            }
        };
        // Duplicate inserts (retried registration) are tolerated.
        if let Err(e) = self.gateway.insert(collections::PROFILES, row).await {
            log::error!("Failed to create profile for {}: {e}", profile.email);
        }
    }
}
