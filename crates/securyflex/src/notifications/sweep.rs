use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;

use super::domain::{LifecycleEvent, WarningTier};
use super::outbox::EventOutbox;
use super::store::NotificationStore;
use crate::accounts::{AccountStore, NdNummerStatus};
use crate::marketplace::compliance::beoordeel;
use crate::store::StoreError;

/// De-duplication window for repeated expiry warnings.
const DEDUP_VENSTER_DAGEN: i64 = 7;

/// Outcome counts for one sweep pass.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub gecontroleerd: usize,
    pub gedemoveerd: usize,
    pub gewaarschuwd: usize,
    pub overgeslagen_dedup: usize,
}

/// Periodic pass over every registered license: demotes expired `Actief`
/// profiles to `Verlopen` and queues tiered expiry warnings at the
/// 90/60/30-day thresholds.
///
/// The de-duplication check is best effort: a warning of the same tier
/// within the last seven days suppresses a new one, but two overlapping
/// sweep runs can still both pass the check.
pub struct ComplianceSweep<A, N, O> {
    accounts: Arc<A>,
    notifications: Arc<N>,
    outbox: Arc<O>,
}

impl<A, N, O> ComplianceSweep<A, N, O>
where
    A: AccountStore + 'static,
    N: NotificationStore + 'static,
    O: EventOutbox + 'static,
{
    pub fn new(accounts: Arc<A>, notifications: Arc<N>, outbox: Arc<O>) -> Self {
        Self {
            accounts,
            notifications,
            outbox,
        }
    }

    pub fn run(&self, nu: DateTime<Utc>) -> Result<SweepReport, StoreError> {
        let vandaag = nu.date_naive();
        let sinds = nu - Duration::days(DEDUP_VENSTER_DAGEN);
        let mut rapport = SweepReport::default();

        for profiel in self.accounts.licentie_profielen()? {
            rapport.gecontroleerd += 1;
            let beoordeling = beoordeel(
                profiel.nd_nummer_status,
                profiel.nd_nummer_verval_datum,
                vandaag,
            );

            if profiel.nd_nummer_status == NdNummerStatus::Actief && beoordeling.is_expired {
                self.accounts.update_nd_nummer_status(
                    &profiel.user_id,
                    NdNummerStatus::Verlopen,
                    vec![LifecycleEvent::NdNummerStatusChanged {
                        user_id: profiel.user_id.clone(),
                        naam: profiel.naam.clone(),
                        van: Some(NdNummerStatus::Actief),
                        naar: NdNummerStatus::Verlopen,
                        risk_level: beoordeling.risk_level,
                    }],
                )?;
                rapport.gedemoveerd += 1;
                continue;
            }

            if profiel.nd_nummer_status != NdNummerStatus::Actief {
                continue;
            }

            let Some(dagen) = beoordeling.days_until_expiry else {
                continue;
            };
            let Some(tier) = WarningTier::voor_dagen(dagen) else {
                continue;
            };
            let Some(verval_datum) = profiel.nd_nummer_verval_datum else {
                continue;
            };

            let event_key = format!("{}:{}", tier.label(), profiel.user_id.0);
            if self.notifications.bestaat_recent(&event_key, sinds)? {
                rapport.overgeslagen_dedup += 1;
                continue;
            }

            self.outbox.append_batch(
                vec![LifecycleEvent::NdNummerExpiryWarning {
                    user_id: profiel.user_id.clone(),
                    naam: profiel.naam.clone(),
                    tier,
                    dagen_resterend: dagen,
                    verval_datum,
                }],
                nu,
            );
            rapport.gewaarschuwd += 1;
        }

        info!(
            gecontroleerd = rapport.gecontroleerd,
            gedemoveerd = rapport.gedemoveerd,
            gewaarschuwd = rapport.gewaarschuwd,
            "compliance sweep afgerond"
        );
        Ok(rapport)
    }
}
