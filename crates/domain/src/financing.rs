// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Financing-modality dispatch.

use crate::types::FinancingModality;
use serde::{Deserialize, Serialize};

/// Bonus rate applied to agricultural on-site courses.
pub const AGRICULTURAL_BONUS_RATE: f64 = 0.5;

/// Share of a weighted enrollment counted for externally funded remote courses.
pub const REMOTE_EXTERNAL_RATE: f64 = 0.25;

/// Share of a weighted enrollment counted for self-funded remote courses.
pub const REMOTE_OWN_RATE: f64 = 0.80;

/// The financing stage of one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancingOutcome {
    /// The modality dispatched on. `None` when unrecognized.
    pub modality: Option<FinancingModality>,
    /// MP: weighted enrollments.
    #[serde(rename = "MP")]
    pub weighted_enrollments: f64,
    /// BA: agricultural bonus. Only added to the total for on-site courses.
    #[serde(rename = "BA")]
    pub agricultural_bonus: f64,
    /// CMTD25: externally funded remote value, when that modality applies.
    #[serde(rename = "CMTD25")]
    pub remote_external_value: Option<f64>,
    /// CMTD80: self-funded remote value, when that modality applies.
    #[serde(rename = "CMTD80")]
    pub remote_own_value: Option<f64>,
    /// MT: total enrollment equivalence.
    #[serde(rename = "MT")]
    pub total: f64,
}

/// Applies the course weight, the agricultural bonus and the modality
/// multiplier to the equalized enrollments.
///
/// The agricultural bonus is only added for on-site courses. An
/// unrecognized modality yields a total of zero.
#[must_use]
pub fn dispatch_financing(
    equalized_enrollments: f64,
    course_weight: f64,
    is_agricultural: bool,
    modality: Option<FinancingModality>,
) -> FinancingOutcome {
    let weighted_enrollments: f64 = equalized_enrollments * course_weight;
    let agricultural_bonus: f64 = if is_agricultural {
        weighted_enrollments * AGRICULTURAL_BONUS_RATE
    } else {
        0.0
    };

    let mut outcome: FinancingOutcome = FinancingOutcome {
        modality,
        weighted_enrollments,
        agricultural_bonus,
        remote_external_value: None,
        remote_own_value: None,
        total: 0.0,
    };

    match modality {
        Some(FinancingModality::OnSite) => {
            outcome.total = weighted_enrollments + agricultural_bonus;
        }
        Some(FinancingModality::RemoteOwnFunding) => {
            let value: f64 = weighted_enrollments * REMOTE_OWN_RATE;
            outcome.remote_own_value = Some(value);
            outcome.total = value;
        }
        Some(FinancingModality::RemoteExternalFunding) => {
            let value: f64 = weighted_enrollments * REMOTE_EXTERNAL_RATE;
            outcome.remote_external_value = Some(value);
            outcome.total = value;
        }
        None => {}
    }

    outcome
}
