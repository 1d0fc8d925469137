//! Tab progress through the store, plus the certificate preview built from
//! the same draft.

mod common;

use botanica::models::submission::{Determination, DrugBagPatch, FormField, Section};
use common::{complete_bag_patch, complete_store, defendant, memory_store, officer, staff, station};

#[test]
fn test_case_progress_is_monotonic_while_filling() {
    let (_storage, mut store) = memory_store();
    store.update_field(FormField::Received, "");
    let mut last = store.progress().case_details;
    assert_eq!(last, 0);

    for (field, value) in [
        (FormField::CaseNumber, "BOT-1"),
        (FormField::Received, "2024-02-02"),
        (FormField::SecurityMovementEnvelope, "SME-1"),
    ] {
        store.update_field(field, value);
        let now = store.progress().case_details;
        assert!(now >= last, "{now} < {last}");
        last = now;
    }
    assert_eq!(last, 100);

    store.update_field(FormField::CaseNumber, "   ");
    assert!(store.progress().case_details < 100);
}

#[test]
fn test_officers_progress_ignores_requesting_officer() {
    let (_storage, mut store) = memory_store();
    store.set_selected_officer(Some(officer(11, "Mele", "Fifita")));
    store.set_selected_station(Some(station(3, "Central")));
    store.set_selected_botanist(Some(staff(21, "Iris", "Moana", "Botanist")));
    store.set_selected_finance_officer(Some(staff(22, "Tevita", "Lui", "Finance")));

    assert_eq!(store.draft().requesting_officer_id, None);
    assert_eq!(store.progress().officers, 100);

    store.set_selected_station(None);
    assert_eq!(store.progress().officers, 75);
}

#[test]
fn test_added_bag_is_never_precomplete() {
    let (_storage, mut store) = complete_store();
    let progress = store.progress();
    assert!(progress.all_complete());
    assert!(progress.is_complete(Section::Assessment));

    store.add_drug_bag();
    assert!(store.progress().assessment < 100);
}

#[test]
fn test_assessment_needs_a_bag_and_notes() {
    let (_storage, mut store) = memory_store();
    // Only the assessment date: 1 of 3 slots.
    assert_eq!(store.progress().assessment, 33);

    let i = store.add_drug_bag();
    store.update_drug_bag(i, complete_bag_patch("T1", Determination::NotCannabis));
    // date + bag present + 4 bag slots, no notes: 6 of 7.
    assert_eq!(store.progress().assessment, 86);

    store.update_field(FormField::BotanistNotes, "No cystoliths");
    assert_eq!(store.progress().assessment, 100);
}

#[test]
fn test_pending_determination_keeps_bag_incomplete() {
    let (_storage, mut store) = complete_store();
    store.update_drug_bag(0, DrugBagPatch {
        determination: Some(Determination::Pending),
        ..DrugBagPatch::default()
    });
    assert!(store.progress().assessment < 100);
}

// ────────────────────────────────────────────────────────────────────
// Certificate preview
// ────────────────────────────────────────────────────────────────────

#[test]
fn test_certificate_reflects_draft_and_cache() {
    let (_storage, mut store) = complete_store();
    store.set_selected_defendants(vec![defendant(31, "John", "Doe"), defendant(32, "Jane", "Roe")]);
    let i = store.add_drug_bag();
    store.update_drug_bag(i, complete_bag_patch("T2", Determination::NotCannabis));

    let cert = store.certificate();
    assert_eq!(cert.case_number, "BOT-2024-001");
    assert_eq!(cert.submitting_officer.as_deref(), Some("Constable Mele Fifita"));
    assert_eq!(cert.submitting_officer_service_number.as_deref(), Some("SN0011"));
    assert_eq!(cert.station.as_deref(), Some("Central"));
    assert_eq!(cert.botanist.as_deref(), Some("Iris Moana"));
    assert_eq!(cert.defendants, vec!["John Doe", "Jane Roe"]);
    assert_eq!(cert.bags.len(), 2);
    assert_eq!(cert.bags[0].label, "Bag #1");
    assert_eq!(cert.bags[1].label, "Bag #2");
    assert_eq!(cert.bags[1].determination, "Not cannabis");
    assert!(cert.cannabis_present);
}

#[test]
fn test_certificate_labels_follow_bag_order() {
    let (_storage, mut store) = complete_store();
    let i = store.add_drug_bag();
    store.update_drug_bag(i, complete_bag_patch("T2", Determination::Inconclusive));

    store.reorder_drug_bags(1, 0);
    let cert = store.certificate();
    assert_eq!(cert.bags[0].label, "Bag #1");
    assert_eq!(cert.bags[0].seal_tag_numbers, "T2-O");
    assert_eq!(cert.bags[1].seal_tag_numbers, "T1-O");
}

#[test]
fn test_cannabis_flag_follows_determinations() {
    let (_storage, mut store) = complete_store();
    assert!(store.certificate().cannabis_present);

    store.update_drug_bag(0, DrugBagPatch {
        determination: Some(Determination::NotCannabis),
        ..DrugBagPatch::default()
    });
    assert!(!store.certificate().cannabis_present);

    store.update_drug_bag(0, DrugBagPatch {
        determination: Some(Determination::CannabisHybrid),
        ..DrugBagPatch::default()
    });
    assert!(store.certificate().cannabis_present);
}

#[test]
fn test_certificate_is_side_effect_free() {
    let (_storage, mut store) = complete_store();
    store.save_draft();
    let before = store.draft().clone();

    let a = store.certificate();
    let b = store.certificate();

    assert_eq!(a, b);
    assert_eq!(store.draft(), &before);
    assert!(!store.is_dirty());
    assert!(!store.autosave_pending());
}
