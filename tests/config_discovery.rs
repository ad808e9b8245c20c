// Loading configuration and marker tables from disk.
mod common;

use std::fs;

use common::TestTree;
use powerpack::{Marker, MarkerTable, PowerpackConfig, PowerpackError, CONFIG_FILE_NAME};

#[test]
fn discover_walks_up_to_the_nearest_config() {
    let tree = TestTree::new("test_root.rs");
    fs::write(
        tree.dir().join(CONFIG_FILE_NAME),
        "expect_folder: golden\nbuild_folder: out\n",
    )
    .unwrap();
    let nested = tree.dir().join("suite").join("unit");
    fs::create_dir_all(&nested).unwrap();

    let config = PowerpackConfig::discover(&nested).unwrap();
    assert_eq!(config, PowerpackConfig::new("golden", "out").unwrap());
}

#[test]
fn discover_prefers_the_closest_config() {
    let tree = TestTree::new("test_root.rs");
    fs::write(
        tree.dir().join(CONFIG_FILE_NAME),
        "expect_folder: outer\nbuild_folder: outer_build\n",
    )
    .unwrap();
    let nested = tree.dir().join("suite");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        nested.join(CONFIG_FILE_NAME),
        "expect_folder: inner\nbuild_folder: inner_build\n",
    )
    .unwrap();

    let config = PowerpackConfig::discover(&nested).unwrap();
    assert_eq!(config.expect_folder, "inner");
}

#[test]
fn load_reports_unreadable_path() {
    let tree = TestTree::new("test_root.rs");
    let err = PowerpackConfig::load(tree.dir().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, PowerpackError::ConfigRead { .. }));
}

#[test]
fn load_validates_folders() {
    let tree = TestTree::new("test_root.rs");
    let path = tree.dir().join(CONFIG_FILE_NAME);
    fs::write(&path, "expect_folder: \"\"\nbuild_folder: build\n").unwrap();

    assert!(matches!(
        PowerpackConfig::load(&path),
        Err(PowerpackError::InvalidConfig { .. })
    ));
}

#[test]
fn marker_table_drives_file_fixtures() {
    let tree = TestTree::new("test_table.rs");
    tree.golden("expected", "test_table", "table.txt", "from the table\n");
    let table_path = tree.dir().join("markers.yaml");
    fs::write(
        &table_path,
        "test_uses_table:\n  - name: powerpack_compare_file\n    args: [\"table.txt\"]\n",
    )
    .unwrap();

    let table = MarkerTable::load(&table_path).unwrap();
    let request = tree
        .request(&common::default_config())
        .with_table_markers(&table, "test_uses_table");

    let files = request.comparison_files().unwrap();
    files.write_build("from the table\n").unwrap();
    powerpack::compare_files(&files).unwrap();

    let untouched = tree
        .request(&common::default_config())
        .with_table_markers(&table, "test_without_markers");
    assert!(untouched.expect_file().unwrap_err().is_marker_error());
}

#[test]
fn marker_table_rejects_malformed_yaml() {
    let err = MarkerTable::from_yaml_str("test_a: not-a-list\n").unwrap_err();
    assert!(matches!(err, PowerpackError::MarkerTableParse { .. }));
    assert_eq!(MarkerTable::new().markers_for("test_a"), &[] as &[Marker]);
}
