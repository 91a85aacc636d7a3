//! CLI parsing and binary-level tests.

use std::process::Command;

use mentorlink::cli::args::UserArgs;
use mentorlink::cli::{parse_args, CliCommand};
use mentorlink::models::Decision;

fn parse(args: &[&str]) -> CliCommand {
    parse_args(
        std::iter::once("mentorlink")
            .chain(args.iter().copied())
            .map(String::from),
    )
}

#[test]
fn test_every_command_parses() {
    assert_eq!(parse(&["logout"]), CliCommand::Logout);
    assert_eq!(parse(&["whoami"]), CliCommand::Whoami);
    assert_eq!(parse(&["users"]), CliCommand::Users);
    assert_eq!(parse(&["matches"]), CliCommand::Matches);
    assert_eq!(parse(&["stats"]), CliCommand::Stats);
    assert_eq!(parse(&["requests"]), CliCommand::Requests);
    assert_eq!(parse(&["mentees"]), CliCommand::Mentees);
    assert_eq!(parse(&["sessions"]), CliCommand::Sessions);
    assert_eq!(
        parse(&["register", "ada", "ada@x.io", "secret1", "mentee"]),
        CliCommand::Register {
            username: "ada".to_string(),
            email: "ada@x.io".to_string(),
            password: "secret1".to_string(),
            role: "mentee".to_string(),
        }
    );
    assert_eq!(
        parse(&["forgot-password", "ada@x.io"]),
        CliCommand::ForgotPassword { email: "ada@x.io".to_string() }
    );
    assert_eq!(
        parse(&["reset-password", "tok", "newpass"]),
        CliCommand::ResetPassword {
            token: "tok".to_string(),
            password: "newpass".to_string(),
        }
    );
    assert_eq!(
        parse(&["assign", "e1", "m1"]),
        CliCommand::Assign {
            mentee_id: "e1".to_string(),
            mentor_id: "m1".to_string(),
        }
    );
    assert_eq!(
        parse(&["request", "4"]),
        CliCommand::Request { mentor_id: "4".to_string() }
    );
    assert_eq!(
        parse(&["book", "4", "2025-03-01", "09:00", "10:00"]),
        CliCommand::Book {
            mentor_id: "4".to_string(),
            date: "2025-03-01".to_string(),
            start: "09:00".to_string(),
            end: "10:00".to_string(),
        }
    );
    assert_eq!(
        parse(&["respond", "8", "ACCEPT"]),
        CliCommand::Respond {
            request_id: "8".to_string(),
            decision: Decision::Accept,
        }
    );
}

#[test]
fn test_flag_values_may_contain_spaces() {
    match parse(&["profile", "--skills", "rust, distributed systems", "--goals", "Mentor juniors"]) {
        CliCommand::Profile(args) => {
            assert_eq!(args.skills.as_deref(), Some("rust, distributed systems"));
            assert_eq!(args.goals.as_deref(), Some("Mentor juniors"));
            assert!(args.bio.is_none());
        }
        other => panic!("expected profile, got {:?}", other),
    }
}

#[test]
fn test_add_user_rejects_positionals() {
    assert!(matches!(parse(&["add-user", "carol"]), CliCommand::Usage(_)));
    assert_eq!(
        parse(&["add-user", "--username", "carol", "--email", "c@x.io", "--password", "secret1"]),
        CliCommand::AddUser(UserArgs {
            username: Some("carol".to_string()),
            email: Some("c@x.io".to_string()),
            password: Some("secret1".to_string()),
            role: None,
        })
    );
}

#[test]
fn test_version_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_mentorlink"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success(), "Version flag should exit with code 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("mentorlink "));
}

#[test]
fn test_bad_arguments_exit_with_one() {
    let output = Command::new(env!("CARGO_BIN_EXE_mentorlink"))
        .arg("dance")
        .output()
        .expect("Failed to execute binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown command 'dance'"));
    assert!(stderr.contains("Usage: mentorlink"));
}
