use semnet::{events::Event, NodeKind, Settings};

#[test]
fn test_settings_roundtrip() {
    let settings = Settings::default();
    let json = serde_json::to_string(&settings).expect("serialize settings");
    let back: Settings = serde_json::from_str(&json).expect("deserialize settings");
    assert_eq!(back, settings);
}

#[test]
fn test_partial_settings_fill_defaults() {
    let settings: Settings =
        serde_json::from_str(r#"{"node":{"radius":40.0}}"#).expect("deserialize settings");
    assert_eq!(settings.node.radius, 40.);
    assert_eq!(settings.navigation, Settings::default().navigation);
    assert_eq!(settings.force.iterations, 50);
}

#[test]
fn test_event_contract_node_added() {
    let json = r#"{"NodeAdded":{"name":"bird","kind":"Class","location":[1.0,2.0]}}"#;
    let event: Event = serde_json::from_str(json).expect("deserialize event");
    match &event {
        Event::NodeAdded(p) => {
            assert_eq!(p.name, "bird");
            assert_eq!(p.kind, NodeKind::Class);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(serde_json::to_string(&event).unwrap(), json);
}
