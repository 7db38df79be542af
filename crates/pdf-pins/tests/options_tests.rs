use pdf_pins::*;

#[test]
fn test_validation_negative_widths() {
    let mut options = PinOptions::default();
    assert!(options.validate().is_ok());

    options.border_width_mm = -1.0;
    match options.validate() {
        Err(PinError::Config(msg)) => assert!(msg.contains("Border width")),
        _ => panic!("Expected Config error"),
    }

    options.border_width_mm = 0.0;
    options.text_outline_width_pt = -0.5;
    assert!(options.validate().is_err());
}

#[test]
fn test_validation_slot_overrides() {
    let options = PinOptions::default().with_framing(&[1.0, 0.0], &[], &[]);
    match options.validate() {
        Err(PinError::Config(msg)) => assert!(msg.contains("Slot 2")),
        _ => panic!("Expected Config error"),
    }

    let options = PinOptions::default().with_framing(&[], &[f32::NAN], &[]);
    assert!(options.validate().is_err());
}

#[test]
fn test_validation_font_sizes() {
    let mut options = PinOptions {
        default_text_size: Some(0.0),
        ..Default::default()
    };
    assert!(options.validate().is_err());

    options.default_text_size = Some(12.0);
    options.text_blocks = vec![TextBlock::new(vec![TextLine::with_size("x", -3.0)])];
    match options.validate() {
        Err(PinError::Config(msg)) => assert!(msg.contains("Text block 1")),
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_validation_dpi() {
    let options = PinOptions {
        raster_dpi: 0.0,
        ..Default::default()
    };
    assert!(options.validate().is_err());
}

#[test]
fn test_text_style_mirrors_options() {
    let options = PinOptions {
        text_position: TextPosition::Bottom,
        text_color: RgbColor::WHITE,
        text_outline_color: Some(RgbColor::BLACK),
        text_outline_width_pt: 1.5,
        ..Default::default()
    };
    let style = options.text_style();
    assert_eq!(style.position, TextPosition::Bottom);
    assert_eq!(style.color, RgbColor::WHITE);
    assert_eq!(style.outline(), Some((RgbColor::BLACK, 1.5)));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let mut options = PinOptions::default().with_framing(&[1.25], &[3.0], &[-2.0]);
    options.size = PinSize::Large;
    options.duplicate = true;
    options.background_color = Some(RgbColor::new(0x12, 0x34, 0x56));
    options.border_color = Some(RgbColor::BLACK);
    options.border_width_mm = 1.5;
    options.text_blocks = vec![
        TextBlock::from_delimited("Hello|World"),
        TextBlock::new(vec![TextLine::with_size("Big", 20.0)]),
    ];
    options.text_position = TextPosition::Top;

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    // Save
    options.save(path).await.unwrap();

    // Load
    let loaded = PinOptions::load(path).await.unwrap();
    assert_eq!(loaded, options);

    // Colours are stored as hex strings
    let json = std::fs::read_to_string(path).unwrap();
    assert!(json.contains("\"#123456\""));
    assert!(json.contains("\"58mm\""));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), r#"{ "duplicate": true, "text_color": "white" }"#).unwrap();

    let loaded = PinOptions::load(temp_file.path()).await.unwrap();
    assert!(loaded.duplicate);
    assert_eq!(loaded.text_color, RgbColor::WHITE);
    assert_eq!(loaded.size, PinSize::Small);
    assert_eq!(loaded.raster_dpi, PinOptions::default().raster_dpi);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_config() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "not json").unwrap();

    match PinOptions::load(temp_file.path()).await {
        Err(PinError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
        _ => panic!("Expected Config error"),
    }
}
