// Sets a process-wide environment variable, so this file holds a single test

use autoload_core::{Resolver, INSTALL_DIR_ENV};
use std::path::PathBuf;

#[test]
fn test_install_dir_fallbacks() {
    std::env::remove_var(INSTALL_DIR_ENV);
    let exe_dir = std::env::current_exe()
        .expect("current exe")
        .parent()
        .map(PathBuf::from)
        .expect("exe dir");
    assert_eq!(Resolver::new().install_dir().expect("install dir"), exe_dir);

    std::env::set_var(INSTALL_DIR_ENV, "/opt/acme/vendor");
    let from_env = Resolver::new().install_dir().expect("install dir");
    let explicit = Resolver::new()
        .with_install_dir("/srv/app")
        .install_dir()
        .expect("install dir");
    std::env::remove_var(INSTALL_DIR_ENV);

    assert_eq!(from_env, PathBuf::from("/opt/acme/vendor"));
    assert_eq!(explicit, PathBuf::from("/srv/app"));
}
