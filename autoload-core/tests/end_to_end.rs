use autoload_core::{
    bootstrap, AutoloadConfig, DeclarationScanner, MatchStrategy, Resolver, Runtime,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    fs::write(path, content).expect("write");
}

fn project(manifest: &str) -> tempfile::TempDir {
    let tmp = tempdir().expect("tempdir");
    write(&tmp.path().join("composer.json"), manifest);
    write(
        &tmp.path().join("app").join("Models").join("User.php"),
        "<?php\n\nnamespace App\\Models;\n\nclass User\n{\n}\n",
    );
    tmp
}

fn config_for(root: &Path) -> AutoloadConfig {
    AutoloadConfig {
        install_dir: Some(root.join("vendor").join("autoload")),
        ..AutoloadConfig::default()
    }
}

#[test]
fn test_resolves_user_model_from_manifest() {
    let tmp = project(r#"{"autoload":{"psr-4":{"App\\":"app/"}}}"#);
    let user_file = tmp.path().join("app/Models/User.php");

    let mut runtime = Runtime::new(DeclarationScanner::new());
    bootstrap(&mut runtime, &config_for(tmp.path())).expect("bootstrap");

    assert!(runtime.ensure_loaded("App\\Models\\User").expect("load"));
    assert!(runtime.is_defined("App\\Models\\User"));
    assert_eq!(runtime.executor().include_count(&user_file), 1);

    assert!(!runtime.ensure_loaded("App\\Models\\Missing").expect("load"));

    // Defined symbols are not loaded again
    assert!(runtime.ensure_loaded("App\\Models\\User").expect("load"));
    assert_eq!(runtime.executor().include_count(&user_file), 1);
}

#[test]
fn test_symbols_outside_mapped_namespaces() {
    let tmp = project(r#"{"autoload":{"psr-4":{"App\\":"app/"}}}"#);

    let mut runtime = Runtime::new(DeclarationScanner::new());
    bootstrap(&mut runtime, &config_for(tmp.path())).expect("bootstrap");

    assert!(!runtime.ensure_loaded("Symfony\\Component\\Console").expect("load"));
    assert!(runtime.executor().includes().is_empty());
}

#[test]
fn test_two_resolvers_chain() {
    let tmp = project(r#"{"autoload":{"psr-4":{"App\\":"app/"}}}"#);
    write(
        &tmp.path().join("lib").join("Support").join("Str.php"),
        "<?php\nnamespace Lib\\Support;\nfinal class Str {}\n",
    );

    let mut runtime = Runtime::new(DeclarationScanner::new());
    bootstrap(&mut runtime, &config_for(tmp.path())).expect("bootstrap");

    let mut extra = Resolver::new();
    extra.add_mapping("Lib\\", tmp.path().join("lib").to_str().expect("utf-8"));
    std::rc::Rc::new(extra).register(&mut runtime);

    assert_eq!(runtime.loaders_len(), 2);
    assert!(runtime.ensure_loaded("Lib\\Support\\Str").expect("load"));
    assert!(runtime.ensure_loaded("App\\Models\\User").expect("load"));
    assert_eq!(runtime.executor().includes().len(), 2);
}

#[test]
fn test_vendor_prefix_needs_longest_prefix_strategy() {
    let tmp = tempdir().expect("tempdir");
    write(
        &tmp.path().join("composer.json"),
        r#"{"autoload":{"psr-4":{"Acme\\Billing\\":"src/"}}}"#,
    );
    write(
        &tmp.path().join("src").join("Invoice.php"),
        "<?php\nnamespace Acme\\Billing;\nclass Invoice {}\n",
    );

    let mut runtime = Runtime::new(DeclarationScanner::new());
    bootstrap(&mut runtime, &config_for(tmp.path())).expect("bootstrap");
    assert!(!runtime.ensure_loaded("Acme\\Billing\\Invoice").expect("load"));

    let config = AutoloadConfig {
        strategy: MatchStrategy::LongestPrefix,
        ..config_for(tmp.path())
    };
    let mut runtime = Runtime::new(DeclarationScanner::new());
    bootstrap(&mut runtime, &config).expect("bootstrap");
    assert!(runtime.ensure_loaded("Acme\\Billing\\Invoice").expect("load"));
}

#[test]
fn test_dev_mappings_only_when_requested() {
    let tmp = project(
        r#"{
            "autoload": {"psr-4": {"App\\": "app/"}},
            "autoload-dev": {"psr-4": {"Tests\\": "tests/"}}
        }"#,
    );
    write(
        &tmp.path().join("tests").join("UserTest.php"),
        "<?php\nnamespace Tests;\nclass UserTest {}\n",
    );

    let mut runtime = Runtime::new(DeclarationScanner::new());
    let resolver = bootstrap(&mut runtime, &config_for(tmp.path())).expect("bootstrap");
    assert_eq!(resolver.mappings().len(), 1);
    assert!(!runtime.ensure_loaded("Tests\\UserTest").expect("load"));

    let config = AutoloadConfig {
        include_dev: true,
        ..config_for(tmp.path())
    };
    let mut runtime = Runtime::new(DeclarationScanner::new());
    let resolver = bootstrap(&mut runtime, &config).expect("bootstrap");
    assert_eq!(resolver.mappings().len(), 2);
    assert!(runtime.ensure_loaded("Tests\\UserTest").expect("load"));
}

#[test]
fn test_missing_manifest_is_a_configuration_error() {
    let tmp = tempdir().expect("tempdir");
    let config = AutoloadConfig {
        install_dir: Some(tmp.path().to_path_buf()),
        manifest_name: "autoload-test-missing-manifest.json".to_string(),
        ..AutoloadConfig::default()
    };

    let mut runtime = Runtime::new(DeclarationScanner::new());
    let err = bootstrap(&mut runtime, &config).expect_err("should fail");
    assert!(err
        .to_string()
        .starts_with("Unable to load composer.json: autoload-test-missing-manifest.json file not found"));
    assert_eq!(runtime.loaders_len(), 0);
}

#[test]
fn test_manifest_without_psr4_section() {
    let tmp = tempdir().expect("tempdir");
    write(
        &tmp.path().join("composer.json"),
        r#"{"name": "acme/empty", "require": {}}"#,
    );

    let mut runtime = Runtime::new(DeclarationScanner::new());
    let err = bootstrap(&mut runtime, &config_for(tmp.path())).expect_err("should fail");
    assert_eq!(
        err.message(),
        "No PSR-4 configuration found in composer.json"
    );
}
