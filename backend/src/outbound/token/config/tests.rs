//! Unit tests for token configuration parsing.

use super::*;
use crate::domain::UserId;
use crate::domain::ports::TokenService;
use crate::outbound::token::JwtTokenService;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use tempfile::NamedTempFile;

fn key_file(len: usize) -> NamedTempFile {
    let file = NamedTempFile::new().expect("temp file");
    std::fs::write(file.path(), vec![b'k'; len]).expect("write key");
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path()
        .to_str()
        .expect("temporary path should be valid UTF-8")
        .to_owned()
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn missing_key_path() -> String {
    std::env::temp_dir()
        .join(format!("token-key-missing-{}", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .into_owned()
}

#[rstest]
fn release_reads_key_file_with_default_ttl() {
    let file = key_file(TOKEN_KEY_MIN_LEN);
    let env = mock_env(HashMap::from([(KEY_FILE_ENV, path_of(&file))]));

    let settings = token_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert_eq!(settings.key.as_bytes().len(), TOKEN_KEY_MIN_LEN);
    assert_eq!(settings.ttl, Duration::from_secs(604_800));
    assert!(!settings.ephemeral);
}

#[rstest]
fn release_rejects_short_keys() {
    let file = key_file(TOKEN_KEY_MIN_LEN - 1);
    let env = mock_env(HashMap::from([(KEY_FILE_ENV, path_of(&file))]));

    let err = token_settings_from_env(&env, BuildMode::Release).expect_err("short key");
    assert!(matches!(
        err,
        TokenConfigError::KeyTooShort { length, min_len: TOKEN_KEY_MIN_LEN, .. }
            if length == TOKEN_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn debug_accepts_short_keys() {
    let file = key_file(8);
    let env = mock_env(HashMap::from([(KEY_FILE_ENV, path_of(&file))]));

    let settings = token_settings_from_env(&env, BuildMode::Debug).expect("debug settings");
    assert_eq!(settings.key.as_bytes().len(), 8);
}

#[rstest]
fn release_missing_key_file_is_an_error() {
    let env = mock_env(HashMap::from([(KEY_FILE_ENV, missing_key_path())]));

    let err = token_settings_from_env(&env, BuildMode::Release).expect_err("missing key");
    assert!(matches!(err, TokenConfigError::KeyRead { .. }));
}

#[rstest]
fn debug_missing_key_file_uses_ephemeral_key() {
    let env = mock_env(HashMap::from([(KEY_FILE_ENV, missing_key_path())]));

    let settings = token_settings_from_env(&env, BuildMode::Debug).expect("debug settings");
    assert!(settings.ephemeral);
    assert_eq!(settings.key.as_bytes().len(), EPHEMERAL_KEY_LEN);
}

#[rstest]
fn release_rejects_ephemeral_opt_in() {
    let file = key_file(TOKEN_KEY_MIN_LEN);
    let env = mock_env(HashMap::from([
        (KEY_FILE_ENV, path_of(&file)),
        (ALLOW_EPHEMERAL_ENV, "1".to_owned()),
    ]));

    let err = token_settings_from_env(&env, BuildMode::Release).expect_err("ephemeral");
    assert!(matches!(err, TokenConfigError::EphemeralNotAllowed));
}

#[rstest]
#[case("0")]
#[case("-5")]
#[case("soon")]
#[case("10000000000000")]
#[case("315360001")]
fn release_rejects_invalid_ttl(#[case] value: &str) {
    let file = key_file(TOKEN_KEY_MIN_LEN);
    let env = mock_env(HashMap::from([
        (KEY_FILE_ENV, path_of(&file)),
        (TTL_ENV, value.to_owned()),
    ]));

    let err = token_settings_from_env(&env, BuildMode::Release).expect_err("invalid ttl");
    assert!(matches!(err, TokenConfigError::InvalidEnv { name: TTL_ENV, .. }));
}

#[rstest]
fn debug_invalid_ttl_falls_back_to_default() {
    let file = key_file(TOKEN_KEY_MIN_LEN);
    let env = mock_env(HashMap::from([
        (KEY_FILE_ENV, path_of(&file)),
        (TTL_ENV, "never".to_owned()),
    ]));

    let settings = token_settings_from_env(&env, BuildMode::Debug).expect("debug settings");
    assert_eq!(settings.ttl, Duration::from_secs(DEFAULT_TTL_SECS));
}

#[rstest]
fn ten_year_ttl_still_issues_credentials() {
    let file = key_file(TOKEN_KEY_MIN_LEN);
    let env = mock_env(HashMap::from([
        (KEY_FILE_ENV, path_of(&file)),
        (TTL_ENV, MAX_TTL_SECS.to_string()),
    ]));

    let settings = token_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert_eq!(settings.ttl, Duration::from_secs(MAX_TTL_SECS));

    let tokens = JwtTokenService::new(&settings).expect("service builds");
    let issued = tokens
        .issue(&UserId::random())
        .expect("expiry is representable");
    assert!(issued.expires_at > chrono::Utc::now());
}

#[rstest]
fn explicit_ttl_is_honoured() {
    let file = key_file(TOKEN_KEY_MIN_LEN);
    let env = mock_env(HashMap::from([
        (KEY_FILE_ENV, path_of(&file)),
        (TTL_ENV, " 900 ".to_owned()),
    ]));

    let settings = token_settings_from_env(&env, BuildMode::Release).expect("valid settings");
    assert_eq!(settings.ttl, Duration::from_secs(900));
}

#[rstest]
fn debug_output_redacts_key_material() {
    let key = TokenKey::from_bytes(b"super-secret-key-material-000000".to_vec());
    let rendered = format!("{key:?}");
    assert!(!rendered.contains("super-secret"));
}
