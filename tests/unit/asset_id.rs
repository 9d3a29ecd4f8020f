/// Asset identifier codec
use stamps_codec::asset_id::{
    asset_id_to_name, asset_name_to_id, numeric_asset_name, AssetIdError, MIN_NAMED_ASSET_ID,
    MIN_NUMERIC_ASSET_ID, NUMERIC_ASSET_BOUNDARY,
};

#[test]
fn test_known_asset_ids() {
    // Base-26 with A = 0: B*26^3 + A + A + A
    assert_eq!(asset_name_to_id("BAAA"), Ok(MIN_NAMED_ASSET_ID));
    assert_eq!(asset_name_to_id("BAAB"), Ok(MIN_NAMED_ASSET_ID + 1));
    assert_eq!(asset_name_to_id("ZZZZZZZZZZZZ"), Ok(NUMERIC_ASSET_BOUNDARY - 1));
}

#[test]
fn test_numeric_assets() {
    let name = format!("A{}", MIN_NUMERIC_ASSET_ID);
    assert_eq!(asset_name_to_id(&name), Ok(MIN_NUMERIC_ASSET_ID));
    assert_eq!(asset_name_to_id("A18446744073709551615"), Ok(u64::MAX));
    assert!(matches!(
        asset_name_to_id("A18446744073709551616"),
        Err(AssetIdError::NumericOutOfRange(_))
    ));
    assert!(matches!(
        asset_name_to_id(&format!("A{}", NUMERIC_ASSET_BOUNDARY)),
        Err(AssetIdError::NumericOutOfRange(_))
    ));
}

#[test]
fn test_invalid_names() {
    assert_eq!(asset_name_to_id(""), Err(AssetIdError::Empty));
    assert!(matches!(
        asset_name_to_id("ABCD"),
        Err(AssetIdError::StartsWithA(_))
    ));
    assert!(matches!(
        asset_name_to_id("BCD"),
        Err(AssetIdError::InvalidLength { len: 3, .. })
    ));
    assert!(matches!(
        asset_name_to_id("stamp"),
        Err(AssetIdError::InvalidCharacter(_))
    ));
}

#[test]
fn test_generated_numeric_names_are_valid() {
    for entropy in [0u64, 1, 42, u64::MAX / 3, u64::MAX] {
        let name = numeric_asset_name(entropy);
        let id = asset_name_to_id(&name).unwrap();
        assert!(id >= MIN_NUMERIC_ASSET_ID);
        assert_eq!(asset_id_to_name(id), Some(name));
    }
}

#[test]
fn test_unnamed_ids() {
    assert_eq!(asset_id_to_name(2), None);
    assert_eq!(asset_id_to_name(MIN_NAMED_ASSET_ID - 1), None);
    assert_eq!(asset_id_to_name(NUMERIC_ASSET_BOUNDARY), None);
}
