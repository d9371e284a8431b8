//! The post-purchase spin wheel. The wheel itself is pure local state; the
//! at-most-once guarantee lives in the store's reward attachment, so a
//! re-rendered wheel can never overwrite a claimed reward.

use crate::gateway::{DataGateway, IdentityGateway};
use crate::models::Reward;
use crate::store::Store;
use rand::Rng;

pub struct SpinWheel {
    segments: Vec<Reward>,
    result: Option<Reward>,
}

impl SpinWheel {
    /// Builds the wheel from the configured reward list; an empty list
    /// falls back to a single consolation segment so the wheel always
    /// renders.
    pub fn new(rewards: &[Reward]) -> Self {
        let segments = if rewards.is_empty() {
            vec![Reward::fallback()]
        } else {
            rewards.to_vec()
        };
        Self {
            segments,
            result: None,
        }
    }

    pub fn segments(&self) -> &[Reward] {
        &self.segments
    }

    pub fn has_spun(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&Reward> {
        self.result.as_ref()
    }

    /// Picks a segment uniformly at random. The first spin wins; repeat
    /// calls return the original result unchanged.
    pub fn spin(&mut self) -> &Reward {
        if self.result.is_none() {
            let index = rand::thread_rng().gen_range(0..self.segments.len());
            self.result = Some(self.segments[index].clone());
        }
        self.result.as_ref().expect("result set above")
    }

    /// Spins (if not yet spun) and writes the won label onto the order.
    /// Returns the reward only when the order accepted it.
    pub async fn claim<G>(&mut self, store: &mut Store<G>, order_id: &str) -> Option<Reward>
    where
        G: DataGateway + IdentityGateway,
    {
        let reward = self.spin().clone();
        if store.attach_spin_reward(order_id, &reward.label).await {
            Some(reward)
        } else {
            None
        }
    }
}
