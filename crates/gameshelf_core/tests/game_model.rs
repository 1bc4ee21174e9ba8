use chrono::NaiveDate;
use gameshelf_core::{Game, GameValidationError};
use uuid::Uuid;

#[test]
fn new_game_is_an_empty_unsaved_draft() {
    let game = Game::new();

    assert!(!game.uuid.is_nil());
    assert!(game.title.is_empty());
    assert!(!game.borrowed);
    assert_eq!(game.borrowed_to, None);
    assert_eq!(game.borrowed_date, None);
    assert!(game.image.is_empty());
    assert!(!game.is_persisted());
    assert!(game.validate().is_ok());
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Game::with_id(Uuid::nil()).unwrap_err();
    assert_eq!(err, GameValidationError::NilUuid);

    let id = Uuid::new_v4();
    assert_eq!(Game::with_id(id).unwrap().uuid, id);
}

#[test]
fn validate_rejects_loan_details_without_loan() {
    let mut game = Game::new();
    game.borrowed_to = Some("ANA".to_string());
    assert_eq!(
        game.validate().unwrap_err(),
        GameValidationError::LoanDetailsWithoutLoan
    );

    game.borrowed_to = None;
    game.borrowed_date = NaiveDate::from_ymd_opt(2024, 5, 1);
    assert_eq!(
        game.validate().unwrap_err(),
        GameValidationError::LoanDetailsWithoutLoan
    );

    game.borrowed = true;
    assert!(game.validate().is_ok());
}

#[test]
fn clear_loan_restores_the_invariant() {
    let mut game = Game::new();
    game.borrowed = true;
    game.borrowed_to = Some("ANA".to_string());
    game.borrowed_date = NaiveDate::from_ymd_opt(2024, 5, 1);

    game.clear_loan();
    assert!(!game.borrowed);
    assert_eq!(game.borrowed_to, None);
    assert_eq!(game.borrowed_date, None);
    assert!(game.validate().is_ok());
}

#[test]
fn game_serialization_uses_expected_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut game = Game::with_id(id).unwrap();
    game.title = "Chess".to_string();
    game.borrowed = true;
    game.borrowed_to = Some("MARIA".to_string());
    game.borrowed_date = NaiveDate::from_ymd_opt(2024, 5, 1);
    game.image = vec![1, 2, 3];
    game.date_created = Some(1_700_000_000_000);

    let json = serde_json::to_value(&game).unwrap();
    assert_eq!(json["uuid"], id.to_string());
    assert_eq!(json["title"], "Chess");
    assert_eq!(json["borrowed"], true);
    assert_eq!(json["borrowed_to"], "MARIA");
    assert_eq!(json["borrowed_date"], "2024-05-01");
    assert_eq!(json["image"], serde_json::json!([1, 2, 3]));
    assert_eq!(json["date_created"], 1_700_000_000_000_i64);

    let decoded: Game = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, game);
}
