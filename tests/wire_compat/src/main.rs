fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use activity_horizon::{AccountDirectory, DeviceSnapshot, MemoryPlatform};
    use activity_inventory::{InventoryBuilder, InventoryOptions};
    use activity_protocol::{PlatformVersion, PlayHistoryRequest, UserIdentity};
    use serde::Deserialize;

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file into `T`.
    fn load_fixture<T: serde::de::DeserializeOwned>(name: &str) -> T {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values.
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture: serde_json::Value = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  fixture: {fixture}\n  rust:    {reserialized}"
        );
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct RequestCase {
        platform_version: PlatformVersion,
        user: UserIdentity,
        flag: bool,
        payload: String,
    }

    // --- Request layout tests ---

    #[test]
    fn fixture_play_history_requests() {
        let cases: Vec<RequestCase> = load_fixture("play_history_requests.json");
        assert!(!cases.is_empty());

        for case in cases {
            let request =
                PlayHistoryRequest::for_version(case.platform_version, case.user, case.flag);
            assert_eq!(
                hex::encode(request.encode()),
                case.payload,
                "payload mismatch for {} on {}",
                case.user,
                case.platform_version
            );

            let expected = hex::decode(&case.payload).unwrap();
            assert_eq!(PlayHistoryRequest::decode(&expected).unwrap(), request);
        }
    }

    // --- Snapshot and inventory shape tests ---

    #[test]
    fn fixture_device_snapshot() {
        roundtrip_test::<DeviceSnapshot>("device_two_users.json");
        roundtrip_test::<DeviceSnapshot>("device_page_user.json");
    }

    #[test]
    fn malformed_page_storage_fails_to_load() {
        let path = fixtures_dir().join("device_bad_page_storage.json");
        let data = fs::read_to_string(&path).unwrap();

        let err = serde_json::from_str::<DeviceSnapshot>(&data).unwrap_err();
        assert!(err.to_string().contains("invalid hex"), "{err}");
    }

    #[test]
    fn snapshot_builds_expected_inventory() {
        let snapshot: DeviceSnapshot = load_fixture("device_two_users.json");
        let expected: serde_json::Value = load_fixture("inventory_two_users.json");

        let platform = MemoryPlatform::new(snapshot);
        let inventory = InventoryBuilder::from_platform(&platform, InventoryOptions::default())
            .unwrap()
            .build();

        assert_eq!(serde_json::to_value(&inventory).unwrap(), expected);
    }

    #[test]
    fn page_storage_names_second_user() {
        let snapshot: DeviceSnapshot = load_fixture("device_page_user.json");
        let platform = MemoryPlatform::new(snapshot);

        let user = AccountDirectory::new(&platform).current_page_user(&platform);
        assert_eq!(user, Some(UserIdentity::new(0x0b, 0)));

        let inventory = InventoryBuilder::from_platform(&platform, InventoryOptions::default())
            .unwrap()
            .build_for(&[UserIdentity::new(0x0b, 0)]);
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.installed_count(), 1);
    }
}
