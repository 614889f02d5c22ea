// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use dompet::cli;
use dompet::state::{LocalState, Session, Theme};
use dompet::utils::{format_time, TimeFormat};
use tempfile::tempdir;

#[test]
fn missing_state_file_defaults_to_light() {
    let dir = tempdir().unwrap();
    let state = LocalState::load(&dir.path().join("nope.json")).unwrap();
    assert_eq!(state.theme, Theme::Light);
    assert!(state.session.is_none());
}

#[test]
fn theme_toggle_persists() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");
    let mut state = LocalState::default();
    assert_eq!(state.toggle_theme(), Theme::Dark);
    state.save(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"theme\": \"dark\""));
    let mut loaded = LocalState::load(&path).unwrap();
    assert_eq!(loaded.theme, Theme::Dark);
    assert_eq!(loaded.toggle_theme(), Theme::Light);
    assert_eq!("DARK".parse::<Theme>().unwrap(), Theme::Dark);
    assert!("blue".parse::<Theme>().is_err());
}

#[test]
fn expired_sessions_give_no_token() {
    let mut state = LocalState::default();
    assert_eq!(state.active_token(0), None);
    state.session = Some(Session {
        access_token: "tok".into(),
        refresh_token: None,
        email: Some("a@b.id".into()),
        expires_at: Some(1_000),
    });
    assert_eq!(state.active_token(999).as_deref(), Some("tok"));
    assert_eq!(state.active_token(1_000), None);
}

#[test]
fn times_render_in_both_formats() {
    assert_eq!(format_time("13:05", TimeFormat::H12), "1:05 PM");
    assert_eq!(format_time("00:30:00", TimeFormat::H12), "12:30 AM");
    assert_eq!(format_time("09:07:59", TimeFormat::H24), "09:07");
    assert_eq!(format_time("soon", TimeFormat::H24), "soon");
    assert_eq!("24".parse::<TimeFormat>().unwrap(), TimeFormat::H24);
}

#[test]
fn expense_add_arguments_parse() {
    let matches = cli::build_cli().get_matches_from([
        "dompet", "--local", "expense", "add", "--year", "2025", "--month", "3", "--day", "14",
        "--amount", "Rp25.000", "--time", "19:30", "--desc", "bakso",
    ]);
    assert!(matches.get_flag("local"));
    let Some(("expense", exp)) = matches.subcommand() else {
        panic!("no expense subcommand");
    };
    let Some(("add", add)) = exp.subcommand() else {
        panic!("no add subcommand");
    };
    assert_eq!(add.get_one::<i32>("year"), Some(&2025));
    assert_eq!(add.get_one::<u32>("day"), Some(&14));
    assert_eq!(
        add.get_one::<String>("description").map(String::as_str),
        Some("bakso")
    );
}

#[test]
fn month_out_of_range_is_rejected() {
    let res = cli::build_cli().try_get_matches_from([
        "dompet", "dashboard", "--year", "2025", "--month", "13",
    ]);
    assert!(res.is_err());
}
