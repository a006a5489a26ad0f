use docket_engine::stage::{derive_stage, Stage, STAGE_STEPS};
use docket_engine::status::{derive_display_status, DisplayStatus};
use docket_engine::transition::{apply_approve, apply_mark_done};
use docket_record::{Patent, StageId, SubStageKind, TrackingId};
use proptest::prelude::*;
use std::str::FromStr;

fn base_patent() -> Patent {
    Patent::new(TrackingId::from_str("P-PROP").unwrap(), "Widget", "Acme")
}

/// Build a patent from six completion bits in traversal order
fn patent_from_bits(bits: [bool; 6], fer_active: bool, withdrawn: bool) -> Patent {
    let mut patent = base_patent();
    patent.fer_active = fer_active;
    patent.withdrawn = withdrawn;
    for (step, completed) in STAGE_STEPS.iter().zip(bits) {
        patent.sub_stage_mut(step.id, step.kind).completed = completed;
    }
    patent
}

#[test]
fn test_stage_order_matches_traversal_table() {
    // Prefix-complete patents walk the table one step at a time
    let expected = [
        Stage::PsDrafting,
        Stage::PsFiling,
        Stage::CsDrafting,
        Stage::CsFiling,
        Stage::FerDrafting,
        Stage::FerFiling,
    ];
    for n in 0..6 {
        let mut bits = [false; 6];
        for bit in bits.iter_mut().take(n) {
            *bit = true;
        }
        let patent = patent_from_bits(bits, true, false);
        assert_eq!(derive_stage(&patent), expected[n]);
    }

    let all_done = patent_from_bits([true; 6], true, false);
    assert_eq!(derive_stage(&all_done), Stage::Completed);
}

#[test]
fn test_spec_scenario_ps_done_cs_open() {
    // ps complete, cs untouched, no FER cycle
    let patent = patent_from_bits([true, true, false, false, false, false], false, false);
    assert_eq!(derive_stage(&patent), Stage::CsDrafting);

    // with CS drafting already complete the frontier is CS filing
    let patent = patent_from_bits([true, true, true, false, false, false], false, false);
    assert_eq!(derive_stage(&patent), Stage::CsFiling);
}

#[test]
fn test_two_step_protocol_end_to_end() {
    let mut patent = base_patent();
    patent.sub_stage_mut(StageId::Ps, SubStageKind::Drafting).assignee =
        Some("R. Iyer".to_string());

    apply_mark_done(&mut patent, Stage::PsDrafting).unwrap();
    assert_eq!(derive_display_status(&patent), DisplayStatus::Pending);

    apply_approve(&mut patent, Stage::PsDrafting).unwrap();
    assert!(patent.sub_stage(StageId::Ps, SubStageKind::Drafting).completed);
    assert_eq!(derive_stage(&patent), Stage::PsFiling);
}

proptest! {
    #[test]
    fn prop_withdrawn_always_wins(
        bits in prop::array::uniform6(any::<bool>()),
        fer_active in any::<bool>(),
    ) {
        let patent = patent_from_bits(bits, fer_active, true);
        prop_assert_eq!(derive_stage(&patent), Stage::Withdrawn);
        prop_assert_eq!(derive_display_status(&patent), DisplayStatus::Withdrawn);
    }

    #[test]
    fn prop_inactive_fer_never_surfaces(
        bits in prop::array::uniform6(any::<bool>()),
    ) {
        let patent = patent_from_bits(bits, false, false);
        let stage = derive_stage(&patent);
        prop_assert!(!matches!(stage, Stage::FerDrafting | Stage::FerFiling));

        // PS and CS both complete means the pipeline is done
        if bits[0] && bits[1] && bits[2] && bits[3] {
            prop_assert_eq!(stage, Stage::Completed);
        }
    }

    #[test]
    fn prop_derived_stage_is_first_incomplete_required_step(
        bits in prop::array::uniform6(any::<bool>()),
        fer_active in any::<bool>(),
    ) {
        let patent = patent_from_bits(bits, fer_active, false);
        let stage = derive_stage(&patent);

        match STAGE_STEPS.iter().position(|s| s.stage == stage) {
            Some(idx) => {
                let step = &STAGE_STEPS[idx];
                prop_assert!(patent.stage_required(step.id));
                prop_assert!(!patent.sub_stage(step.id, step.kind).completed);
                // Everything required before it is complete
                for earlier in &STAGE_STEPS[..idx] {
                    if patent.stage_required(earlier.id) {
                        prop_assert!(patent.sub_stage(earlier.id, earlier.kind).completed);
                    }
                }
            }
            None => {
                prop_assert_eq!(stage, Stage::Completed);
                for step in &STAGE_STEPS {
                    if patent.stage_required(step.id) {
                        prop_assert!(patent.sub_stage(step.id, step.kind).completed);
                    }
                }
            }
        }
    }
}
