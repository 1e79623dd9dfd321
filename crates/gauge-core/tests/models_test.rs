use gauge_core::models::*;

#[test]
fn encoding_ids_use_wire_names() {
    assert_eq!(
        serde_json::to_string(&EncodingId::Cl100kBase).unwrap(),
        "\"cl100k_base\""
    );
    let parsed: EncodingId = serde_json::from_str("\"o200k_base\"").unwrap();
    assert_eq!(parsed, EncodingId::O200kBase);
}

#[test]
fn encoding_parse_is_case_insensitive_and_rejects_unknown() {
    assert_eq!(EncodingId::parse(" P50K_BASE "), Some(EncodingId::P50kBase));
    assert_eq!(EncodingId::parse("r50k_base"), None);
    for id in EncodingId::ALL {
        assert_eq!(EncodingId::parse(id.as_str()), Some(id));
    }
}

#[test]
fn roles_and_tiers_serialize_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    assert_eq!(serde_json::to_string(&UsageTier::Overflow).unwrap(), "\"overflow\"");
}

#[test]
fn fragment_constructors_set_role() {
    assert_eq!(MessageFragment::user("hi").role, Role::User);
    assert_eq!(MessageFragment::assistant("hi").role, Role::Assistant);
}

#[test]
fn snapshot_remaining_tokens_saturates() {
    let snapshot = UsageSnapshot {
        current_tokens: 12,
        max_tokens: 10,
        percentage: 1.2,
        tier: UsageTier::Overflow,
        is_loading: false,
        flashing: true,
        estimated: false,
    };
    assert_eq!(snapshot.remaining_tokens(), 0);
}

#[test]
fn model_limit_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&ModelLimit::UnboundedEstimate).unwrap(),
        "\"unbounded_estimate\""
    );
    assert_eq!(
        serde_json::to_string(&ModelLimit::Tokens(200)).unwrap(),
        "{\"tokens\":200}"
    );
}

mod properties {
    use gauge_core::models::{EncodingId, UsageSnapshot, UsageTier};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn parse_accepts_only_known_names(name in "[a-z0-9_ ]{0,16}") {
            if let Some(id) = EncodingId::parse(&name) {
                prop_assert_eq!(id.as_str(), name.trim());
            }
        }

        #[test]
        fn remaining_tokens_never_underflows(current in any::<u64>(), max in any::<u64>()) {
            let snapshot = UsageSnapshot {
                current_tokens: current,
                max_tokens: max,
                percentage: 0.0,
                tier: UsageTier::Normal,
                is_loading: false,
                flashing: false,
                estimated: false,
            };
            prop_assert!(snapshot.remaining_tokens() <= max);
        }
    }
}
