use chrono::{Local, TimeZone};
use storybook_core::{ArtStyle, StorybookRequest};
use storybook_error::BuilderErrorKind;

fn request(file_name: &str) -> StorybookRequest {
    StorybookRequest::builder()
        .prompt("a friendly dragon learning to fly")
        .file_name(file_name)
        .build()
        .unwrap()
}

#[test]
fn art_style_defaults_to_cartoon() {
    let request = request("dragon");
    assert_eq!(*request.art_style(), ArtStyle::Cartoon3d);
}

#[test]
fn unknown_art_style_falls_back_to_default() {
    assert_eq!(ArtStyle::parse_or_default("oil painting"), ArtStyle::Cartoon3d);
    assert_eq!(ArtStyle::parse_or_default(" pixel art "), ArtStyle::PixelArt);
    assert_eq!(
        ArtStyle::names(),
        vec!["3d cartoon", "watercolor", "pixel art", "hand drawn", "claymation"]
    );
}

#[test]
fn blank_prompt_is_rejected() {
    let err = StorybookRequest::builder()
        .prompt("   ")
        .file_name("dragon")
        .build()
        .unwrap_err();

    match err.kind() {
        BuilderErrorKind::InvalidField { field, .. } => assert_eq!(field, "prompt"),
        other => panic!("unexpected error kind: {other}"),
    }
}

#[test]
fn blank_file_name_is_rejected() {
    let err = StorybookRequest::builder()
        .prompt("a dragon")
        .file_name("")
        .build()
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        BuilderErrorKind::InvalidField { field, .. } if field == "fileName"
    ));
}

#[test]
fn missing_prompt_is_rejected() {
    let err = StorybookRequest::builder()
        .file_name("dragon")
        .build()
        .unwrap_err();

    assert!(matches!(err.kind(), BuilderErrorKind::MissingField(_)));
}

#[test]
fn story_name_strips_png_suffix() {
    assert_eq!(request("dragon").story_file_name(), "dragon_story.txt");
    assert_eq!(request("dragon.png").story_file_name(), "dragon_story.txt");
    assert_eq!(request("dragon.jpg").story_file_name(), "dragon.jpg_story.txt");
}

#[test]
fn png_image_name_is_kept_verbatim() {
    let now = Local::now();
    assert_eq!(request("dragon.png").image_file_name(now), "dragon.png");
}

#[test]
fn image_name_gets_microsecond_timestamp() {
    let now = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).single().unwrap();
    assert_eq!(
        request("dragon").image_file_name(now),
        "dragon_20240309_140507_000000.png"
    );

    let later = now + chrono::Duration::microseconds(42);
    assert_ne!(
        request("dragon").image_file_name(now),
        request("dragon").image_file_name(later)
    );
}

#[test]
fn image_prompt_names_the_style() {
    let request = StorybookRequest::builder()
        .prompt("a friendly dragon")
        .file_name("dragon")
        .art_style(ArtStyle::Watercolor)
        .build()
        .unwrap();

    assert_eq!(
        request.image_prompt(),
        "a friendly dragon, illustrated in a watercolor style for a children's storybook"
    );
}
