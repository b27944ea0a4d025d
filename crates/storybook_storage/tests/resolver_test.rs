//! Tests for output directory resolution.

use storybook_core::OutputSettings;
use storybook_error::{StorageErrorKind, StorybookErrorKind};
use storybook_storage::{DesktopLocator, PathResolver, Platform};
use tempfile::TempDir;

#[test]
fn working_directory_mode_creates_subdirectory() -> anyhow::Result<()> {
    let work = TempDir::new()?;
    let locator = DesktopLocator::new(Platform::Unix, work.path());
    let resolver = PathResolver::new(locator, work.path(), &OutputSettings::default());

    let dir = resolver.resolve_output_directory(false)?;
    assert_eq!(dir, work.path().join("generated_storybooks"));
    assert!(dir.is_dir());
    Ok(())
}

#[test]
fn resolution_is_idempotent() -> anyhow::Result<()> {
    let work = TempDir::new()?;
    let locator = DesktopLocator::new(Platform::Unix, work.path());
    let resolver = PathResolver::new(locator, work.path(), &OutputSettings::default());

    let first = resolver.resolve_output_directory(false)?;
    let second = resolver.resolve_output_directory(false)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn blocked_directory_is_a_creation_error() -> anyhow::Result<()> {
    let work = TempDir::new()?;
    std::fs::write(work.path().join("generated_storybooks"), b"not a directory")?;
    let locator = DesktopLocator::new(Platform::Unix, work.path());
    let resolver = PathResolver::new(locator, work.path(), &OutputSettings::default());

    let err = resolver.resolve_output_directory(false).unwrap_err();
    match err.kind() {
        StorybookErrorKind::Storage(e) => {
            assert!(matches!(e.kind, StorageErrorKind::DirectoryCreation(_)))
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn unix_prefers_existing_xdg_desktop() -> anyhow::Result<()> {
    let home = TempDir::new()?;
    let xdg = home.path().join("Schreibtisch");
    std::fs::create_dir(&xdg)?;
    std::fs::create_dir(home.path().join("Desktop"))?;

    let locator = DesktopLocator::new(Platform::Unix, home.path()).with_xdg_desktop_dir(&xdg);
    assert_eq!(locator.desktop_dir(), xdg);
    Ok(())
}

#[test]
fn unix_ignores_missing_xdg_desktop() -> anyhow::Result<()> {
    let home = TempDir::new()?;
    std::fs::create_dir(home.path().join("Desktop"))?;

    let locator = DesktopLocator::new(Platform::Unix, home.path())
        .with_xdg_desktop_dir(home.path().join("missing"));
    assert_eq!(locator.desktop_dir(), home.path().join("Desktop"));
    Ok(())
}

#[test]
fn unix_without_desktop_uses_home() -> anyhow::Result<()> {
    let home = TempDir::new()?;
    let locator = DesktopLocator::new(Platform::Unix, home.path());
    assert_eq!(locator.desktop_dir(), home.path());
    Ok(())
}

#[test]
fn macos_always_uses_home_desktop() -> anyhow::Result<()> {
    let home = TempDir::new()?;
    let locator = DesktopLocator::new(Platform::MacOs, home.path());
    assert_eq!(locator.desktop_dir(), home.path().join("Desktop"));
    Ok(())
}

#[test]
fn windows_uses_profile_desktop() -> anyhow::Result<()> {
    let home = TempDir::new()?;
    let profile = TempDir::new()?;
    std::fs::create_dir(profile.path().join("Desktop"))?;

    let locator = DesktopLocator::new(Platform::Windows, home.path()).with_user_profile(profile.path());
    assert_eq!(locator.desktop_dir(), profile.path().join("Desktop"));
    Ok(())
}

#[test]
fn windows_without_desktop_uses_home() -> anyhow::Result<()> {
    let home = TempDir::new()?;
    let profile = TempDir::new()?;

    let locator = DesktopLocator::new(Platform::Windows, home.path()).with_user_profile(profile.path());
    assert_eq!(locator.desktop_dir(), home.path());
    Ok(())
}

#[test]
fn desktop_mode_creates_missing_macos_desktop() -> anyhow::Result<()> {
    let home = TempDir::new()?;
    let locator = DesktopLocator::new(Platform::MacOs, home.path());
    let resolver = PathResolver::new(locator, home.path(), &OutputSettings::default());

    let dir = resolver.resolve_output_directory(true)?;
    assert_eq!(dir, home.path().join("Desktop"));
    assert!(dir.is_dir());
    Ok(())
}

#[test]
fn headless_only_on_unix_without_display() {
    assert!(DesktopLocator::new(Platform::Unix, "/home/a").is_headless());
    assert!(!DesktopLocator::new(Platform::Unix, "/home/a").with_display(":0").is_headless());
    assert!(!DesktopLocator::new(Platform::MacOs, "/Users/a").is_headless());
    assert!(!DesktopLocator::new(Platform::Windows, "C:\\Users\\a").is_headless());
}
