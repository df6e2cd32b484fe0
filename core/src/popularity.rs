//! Content popularity (Zipf law) and the user -> content assignment.

use crate::{
    config::PopularityPolicy,
    error::{GenError, GenResult},
    rng::SimRng,
    types::{ContentId, UserId},
};
use rand_distr::Zeta;
use serde::{Deserialize, Serialize};

/// Probability mass over content ranks `1..=N`, non-increasing in rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularityDistribution {
    exponent:      f64,
    probabilities: Vec<f64>,
    cumulative:    Vec<f64>,
}

impl PopularityDistribution {
    /// weight(rank) = rank^-a, normalised by the sum over all ranks.
    pub fn zipf(content_count: u32, exponent: f64) -> Self {
        let weights: Vec<f64> = (1..=content_count)
            .map(|rank| (rank as f64).powf(-exponent))
            .collect();
        let total: f64 = weights.iter().sum();
        let probabilities: Vec<f64> = weights.iter().map(|w| w / total).collect();

        let mut running = 0.0;
        let cumulative = probabilities
            .iter()
            .map(|p| {
                running += p;
                running
            })
            .collect();

        Self {
            exponent,
            probabilities,
            cumulative,
        }
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// `probabilities()[r - 1]` is the mass of rank `r`.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn content_count(&self) -> u32 {
        self.probabilities.len() as u32
    }

    /// Draw one content id by cumulative roll.
    pub fn sample(&self, rng: &mut SimRng) -> ContentId {
        let roll = rng.next_f64();
        let idx = self.cumulative.partition_point(|&c| c <= roll);
        // Rounding can leave the last cumulative value a hair under 1.0.
        idx.min(self.probabilities.len() - 1) as ContentId
    }
}

/// Each user's single assigned content, indexed by user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAssignment {
    contents: Vec<ContentId>,
}

impl UserAssignment {
    pub fn content_of(&self, user: UserId) -> ContentId {
        self.contents[user as usize]
    }

    pub fn user_count(&self) -> u32 {
        self.contents.len() as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserId, ContentId)> + '_ {
        self.contents
            .iter()
            .enumerate()
            .map(|(user, &content)| (user as UserId, content))
    }
}

/// Draw every user's content independently, with replacement across users.
pub fn assign_users(
    distribution: &PopularityDistribution,
    policy: PopularityPolicy,
    user_count: u32,
    rng: &mut SimRng,
) -> GenResult<UserAssignment> {
    let contents: Vec<ContentId> = match policy {
        PopularityPolicy::Normalized => (0..user_count)
            .map(|_| distribution.sample(rng))
            .collect(),
        PopularityPolicy::LegacyModulo => {
            let zeta = Zeta::new(distribution.exponent())
                .map_err(|e| GenError::distribution("zeta", e))?;
            let n = distribution.content_count() as u64;
            (0..user_count)
                .map(|_| {
                    let variate: f64 = rng.sample(&zeta);
                    ((variate as u64) % n) as ContentId
                })
                .collect()
        }
    };

    log::debug!("popularity: assigned {user_count} users under {policy:?}");
    Ok(UserAssignment { contents })
}
