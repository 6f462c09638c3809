use chrono::{Duration, Local, NaiveTime, Utc};

use securyflex::accounts::{AccountStore, UserId};
use securyflex::config::{CacheConfig, PlatformConfig};
use securyflex::error::AppError;
use securyflex::marketplace::domain::{
    Besluit, OpdrachtDraft, SollicitatiePayload, TargetAudience,
};
use securyflex::notifications::store::NotificationStore;

use crate::infra::{bouw_infrastructuur, seed_demo_data, Infrastructuur};

fn demo_infrastructuur() -> Infrastructuur {
    let infra = bouw_infrastructuur(
        PlatformConfig {
            minimum_uurtarief_cent: 1650,
        },
        &CacheConfig {
            dashboard_ttl_seconds: 60,
        },
    );
    seed_demo_data(&infra);
    infra
}

fn als_io_fout(err: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::Io(std::io::Error::other(err))
}

/// One-shot compliance sweep over the demo accounts, with delivery.
pub(crate) fn run_sweep() -> Result<(), AppError> {
    let infra = demo_infrastructuur();
    let nu = Utc::now();

    let rapport = infra.sweep.run(nu).map_err(als_io_fout)?;
    let bezorging = infra.worker.run_once(nu);

    println!("ND-nummer compliance sweep");
    println!("- {} profielen gecontroleerd", rapport.gecontroleerd);
    println!("- {} gedemoveerd naar VERLOPEN", rapport.gedemoveerd);
    println!("- {} vervalwaarschuwingen aangemaakt", rapport.gewaarschuwd);
    println!("- {} overgeslagen door ontdubbeling", rapport.overgeslagen_dedup);
    println!(
        "Bezorgd: {} notificaties, {} audit entries, {} kanaalberichten",
        bezorging.notificaties, bezorging.audit_entries, bezorging.kanaal_berichten
    );
    Ok(())
}

/// End-to-end walkthrough: plaatsen, solliciteren, besluiten, en de
/// compliance sweep, alles tegen de in-memory adapters.
pub(crate) fn run_demo() -> Result<(), AppError> {
    let infra = demo_infrastructuur();
    let nu = Utc::now();
    let vandaag = Local::now().date_naive();

    let opdrachtgever = infra
        .accounts
        .fetch_user(&UserId("u-klant-1".to_string()))
        .map_err(als_io_fout)?
        .ok_or_else(|| AppError::Io(std::io::Error::other("demo opdrachtgever ontbreekt")))?;
    let zzp = infra
        .accounts
        .fetch_user(&UserId("u-zzp-1".to_string()))
        .map_err(als_io_fout)?
        .ok_or_else(|| AppError::Io(std::io::Error::other("demo zzp'er ontbreekt")))?;
    let bedrijf = infra
        .accounts
        .fetch_user(&UserId("u-bedrijf-1".to_string()))
        .map_err(als_io_fout)?
        .ok_or_else(|| AppError::Io(std::io::Error::other("demo bedrijf ontbreekt")))?;

    println!("SecuryFlex lifecycle demo\n");

    let draft = OpdrachtDraft {
        titel: "Spoeddienst objectbeveiliging".to_string(),
        beschrijving: "Nachtdienst na inbraakmelding, direct starten.".to_string(),
        locatie: "Rotterdam".to_string(),
        start_datum: vandaag + Duration::days(1),
        eind_datum: vandaag + Duration::days(1),
        start_tijd: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
        eind_tijd: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
        uurtarief_cent: 3250,
        aantal_beveiligers: 1,
        target_audience: TargetAudience::Beiden,
        direct_zzp_allowed: true,
        auto_accept: true,
        min_team_grootte: None,
        urgent: true,
        publiceer: true,
        team_leden: Vec::new(),
    };
    let opdracht = infra
        .marketplace
        .create(&opdrachtgever, draft, nu)
        .map_err(als_io_fout)?;
    println!(
        "1. Opdrachtgever plaatst '{}' ({}, {} plek)",
        opdracht.titel,
        opdracht.status.label(),
        opdracht.aantal_beveiligers
    );

    let outcome = infra
        .marketplace
        .apply(&zzp, &opdracht.id, SollicitatiePayload::default(), nu)
        .map_err(als_io_fout)?;
    println!(
        "2. ZZP'er solliciteert: status {} | opdracht {}",
        outcome.sollicitatie.status.label(),
        outcome.opdracht.status.label()
    );
    if let Some(werkuur) = &outcome.werkuur {
        println!(
            "   Werkuur gepland op {} van {} tot {}",
            werkuur.datum, werkuur.start_tijd, werkuur.eind_tijd
        );
    }

    let tweede_draft = OpdrachtDraft {
        titel: "Winkelsurveillance weekend".to_string(),
        beschrijving: "Twee surveillanten voor het winkelgebied.".to_string(),
        locatie: "Amsterdam".to_string(),
        start_datum: vandaag + Duration::days(7),
        eind_datum: vandaag + Duration::days(8),
        start_tijd: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
        eind_tijd: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
        uurtarief_cent: 2600,
        aantal_beveiligers: 2,
        target_audience: TargetAudience::AlleenBedrijven,
        direct_zzp_allowed: false,
        auto_accept: false,
        min_team_grootte: Some(2),
        urgent: false,
        publiceer: true,
        team_leden: Vec::new(),
    };
    let tweede = infra
        .marketplace
        .create(&opdrachtgever, tweede_draft, nu)
        .map_err(als_io_fout)?;
    let sollicitatie = infra
        .marketplace
        .apply(
            &bedrijf,
            &tweede.id,
            SollicitatiePayload {
                team_grootte: Some(2),
                ..SollicitatiePayload::default()
            },
            nu,
        )
        .map_err(als_io_fout)?;
    let besluit = infra
        .marketplace
        .decide(&opdrachtgever, &sollicitatie.sollicitatie.id, Besluit::Accepteren)
        .map_err(als_io_fout)?;
    let toegewezen = besluit
        .opdracht
        .map(|opdracht| opdracht.status.label())
        .unwrap_or("onbekend");
    println!(
        "3. Bedrijf solliciteert op '{}' en wordt geaccepteerd: opdracht {}",
        tweede.titel, toegewezen
    );

    let rapport = infra.sweep.run(nu).map_err(als_io_fout)?;
    println!(
        "4. Compliance sweep: {} gecontroleerd, {} gedemoveerd, {} gewaarschuwd",
        rapport.gecontroleerd, rapport.gedemoveerd, rapport.gewaarschuwd
    );

    let bezorging = infra.worker.run_once(nu);
    println!(
        "5. Fan-out: {} notificaties, {} audit entries, {} kanaalberichten\n",
        bezorging.notificaties, bezorging.audit_entries, bezorging.kanaal_berichten
    );

    for gebruiker in ["u-zzp-1", "u-zzp-2", "u-bedrijf-1", "u-klant-1"] {
        let rijen = infra
            .notifications
            .list_for_user(&UserId(gebruiker.to_string()))
            .map_err(als_io_fout)?;
        for rij in rijen {
            println!("   [{}] {}: {}", gebruiker, rij.titel, rij.bericht);
        }
    }

    Ok(())
}
