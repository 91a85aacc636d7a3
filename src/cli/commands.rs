//! Command dispatch.
//!
//! Each command runs one workflow against the [`Context`] and prints its
//! result. Failures come back as a [`CommandFailure`] whose notice already
//! carries the server message or the command's fallback text.

use std::fmt;
use std::io::{self, Write};

use super::args::{CliCommand, DaySpec, ProfileArgs, UserArgs, USAGE};
use super::version::version_line;
use crate::cli_output::{
    print_empty, print_fields, print_header, print_notice, print_separator, print_table,
};
use crate::error::{ErrorCategory, MentorError};
use crate::models::{Destination, Role};
use crate::notifications::Notice;
use crate::startup::Context;
use crate::traits::KeyValueStore;
use crate::validation;
use crate::workflows::{
    accounts, assignment, availability, booking, browse, inbox, mentees, profile, sessions,
    AssignmentBoard, AvailabilityEditor, BookingForm, MenteeRoster, MentorBrowser, ProfileForm,
    RegisterForm, RequestInbox, SessionListing, SessionScope, UserForm,
};

/// A command that did not complete.
#[derive(Debug)]
pub struct CommandFailure {
    pub notice: Notice,
    pub source: Option<MentorError>,
    /// Print the usage text after the notice.
    pub show_usage: bool,
}

impl CommandFailure {
    fn usage(message: String) -> Self {
        Self {
            notice: Notice::error(message),
            source: None,
            show_usage: true,
        }
    }

    pub fn exit_code(&self) -> i32 {
        1
    }

    /// What to try next, for failures the user cannot fix by editing input.
    pub fn hint(&self) -> Option<&'static str> {
        self.source
            .as_ref()
            .filter(|e| {
                e.requires_reauth()
                    || (!e.is_local_rejection() && e.category() != ErrorCategory::User)
            })
            .map(MentorError::recovery_hint)
    }

    /// Print the notice, then the hint or the usage text.
    pub fn report(&self, out: &mut dyn Write) -> io::Result<()> {
        print_notice(out, &self.notice)?;
        if let Some(hint) = self.hint() {
            writeln!(out, "  {}", hint)?;
        }
        if self.show_usage {
            writeln!(out)?;
            write!(out, "{}", USAGE)?;
        }
        Ok(())
    }
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notice.message)
    }
}

impl std::error::Error for CommandFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<io::Error> for CommandFailure {
    fn from(err: io::Error) -> Self {
        Self {
            notice: Notice::error(format!("Could not write output: {}", err)),
            source: None,
            show_usage: false,
        }
    }
}

/// Map a workflow error to a failure using `fallback` when the server sent
/// no message.
fn fail<E: Into<MentorError>>(fallback: &'static str) -> impl FnOnce(E) -> CommandFailure {
    move |err| {
        let err = err.into();
        CommandFailure {
            notice: Notice::from_error(&err, fallback),
            source: Some(err),
            show_usage: false,
        }
    }
}

type CommandResult = Result<(), CommandFailure>;

/// Run one parsed command, writing its output to `out`.
pub async fn run<S: KeyValueStore>(
    command: CliCommand,
    ctx: &mut Context<S>,
    out: &mut dyn Write,
) -> CommandResult {
    match command {
        CliCommand::Version => {
            writeln!(out, "{}", version_line())?;
            Ok(())
        }
        CliCommand::Help => {
            write!(out, "{}", USAGE)?;
            Ok(())
        }
        CliCommand::Usage(message) => Err(CommandFailure::usage(message)),

        CliCommand::Login { email, password } => login(ctx, out, &email, &password).await,
        CliCommand::Logout => {
            accounts::logout(&mut ctx.api, &mut ctx.session)
                .await
                .map_err(fail("Logout failed"))?;
            print_notice(out, &Notice::success("Logged out"))?;
            Ok(())
        }
        CliCommand::Whoami => whoami(ctx, out).await,
        CliCommand::Register { username, email, password, role } => {
            let form = RegisterForm { username, email, password, role };
            let notice = form
                .submit(&ctx.api)
                .await
                .map_err(fail(accounts::REGISTER_FAILED))?;
            print_notice(out, &notice)?;
            Ok(())
        }
        CliCommand::ForgotPassword { email } => {
            let notice = accounts::forgot_password(&ctx.api, &email)
                .await
                .map_err(fail(accounts::FORGOT_FAILED))?;
            print_notice(out, &notice)?;
            Ok(())
        }
        CliCommand::ResetPassword { token, password } => {
            let notice = accounts::reset_password(&ctx.api, &token, &password)
                .await
                .map_err(fail(accounts::RESET_FAILED))?;
            print_notice(out, &notice)?;
            Ok(())
        }

        CliCommand::Users => users(ctx, out).await,
        CliCommand::AddUser(args) => save_user(ctx, out, UserForm::add(), args).await,
        CliCommand::EditUser { id, changes } => {
            require_role(ctx, Role::Admin)?;
            let form = UserForm::edit(&ctx.api, &id)
                .await
                .map_err(fail(accounts::UPDATE_FAILED))?;
            save_user(ctx, out, form, changes).await
        }
        CliCommand::Assign { mentee_id, mentor_id } => assign(ctx, out, &mentee_id, &mentor_id).await,
        CliCommand::Matches => matches(ctx, out).await,
        CliCommand::Stats => stats(ctx, out).await,

        CliCommand::Mentors { skill, industry } => mentors(ctx, out, skill, industry).await,
        CliCommand::Request { mentor_id } => request(ctx, out, &mentor_id).await,
        CliCommand::Book { mentor_id, date, start, end } => {
            require_role(ctx, Role::Mentee)?;
            let mut form = BookingForm::new(mentor_id).with_slot(&date, &start, &end);
            let notice = form
                .submit(&ctx.api)
                .await
                .map_err(fail(booking::BOOK_FAILED))?;
            print_notice(out, &notice)?;
            Ok(())
        }

        CliCommand::Requests => requests(ctx, out).await,
        CliCommand::Mentees => assigned_mentees(ctx, out).await,
        CliCommand::Respond { request_id, decision } => {
            let mut mentor_inbox = load_inbox(ctx).await?;
            let notice = mentor_inbox
                .respond(&ctx.api, &request_id, decision)
                .await
                .map_err(fail(inbox::RESPOND_FAILED))?;
            print_notice(out, &notice)?;
            writeln!(out, "  {} request(s) still pending", mentor_inbox.pending().count())?;
            Ok(())
        }
        CliCommand::AvailabilityShow => show_availability(ctx, out).await,
        CliCommand::AvailabilitySet(days) => set_availability(ctx, out, &days).await,

        CliCommand::Sessions => list_sessions(ctx, out).await,
        CliCommand::Profile(args) => update_profile(ctx, out, args).await,
    }
}

fn require_role<S: KeyValueStore>(ctx: &Context<S>, role: Role) -> Result<crate::models::User, CommandFailure> {
    ctx.session
        .require_role(role)
        .cloned()
        .map_err(fail("Not allowed"))
}

async fn login<S: KeyValueStore>(
    ctx: &mut Context<S>,
    out: &mut dyn Write,
    email: &str,
    password: &str,
) -> CommandResult {
    let destination = accounts::login(&mut ctx.api, &mut ctx.session, email, password)
        .await
        .map_err(fail(accounts::LOGIN_FAILED))?;
    let name = ctx
        .session
        .current_user()
        .map(|u| u.username.clone())
        .unwrap_or_default();
    print_notice(out, &Notice::success(format!("Logged in as {}", name)))?;
    if destination == Destination::ProfileSetup {
        print_notice(
            out,
            &Notice::info("Complete your profile first: mentorlink profile --skills <a,b,...>"),
        )?;
    }
    Ok(())
}

async fn whoami<S: KeyValueStore>(ctx: &mut Context<S>, out: &mut dyn Write) -> CommandResult {
    let user = ctx
        .session
        .require_user()
        .cloned()
        .map_err(fail("Not logged in"))?;
    print_header(out, "Signed in")?;
    print_fields(
        out,
        &[
            ("User", user.username.clone()),
            ("Email", user.email.clone()),
            ("Role", user.role.to_string()),
            ("Skills", user.skills_line()),
            ("Home", user.destination().path().to_string()),
        ],
    )?;

    let info = accounts::dashboard_info(&ctx.api, &user)
        .await
        .map_err(fail(accounts::INFO_FAILED))?;
    print_separator(out)?;
    print_fields(
        out,
        &[
            ("Server name", info.username),
            ("Server email", info.email),
        ],
    )?;
    Ok(())
}

async fn load_board<S: KeyValueStore>(ctx: &Context<S>) -> Result<AssignmentBoard, CommandFailure> {
    require_role(ctx, Role::Admin)?;
    let mut board = AssignmentBoard::new();
    board
        .load(&ctx.api)
        .await
        .map_err(fail(assignment::LOAD_FAILED))?;
    if let Err(e) = board.refresh_matches(&ctx.api).await {
        tracing::warn!("Could not load matches: {}", e);
    }
    Ok(board)
}

async fn users<S: KeyValueStore>(ctx: &mut Context<S>, out: &mut dyn Write) -> CommandResult {
    let board = load_board(ctx).await?;
    print_header(out, "Users")?;
    if board.users().is_empty() {
        print_empty(out, "users")?;
        return Ok(());
    }
    let mentor_name = |mentee_id: &str| -> String {
        board
            .selected_for(mentee_id)
            .and_then(|mentor_id| board.users().iter().find(|u| u.id == mentor_id))
            .map(|mentor| mentor.username.clone())
            .unwrap_or_default()
    };
    let rows: Vec<Vec<String>> = board
        .users()
        .iter()
        .map(|u| {
            vec![
                u.id.clone(),
                u.username.clone(),
                u.email.clone(),
                u.role.clone().unwrap_or_default(),
                if u.is_mentee() { mentor_name(&u.id) } else { String::new() },
            ]
        })
        .collect();
    print_table(out, &["ID", "USERNAME", "EMAIL", "ROLE", "MENTOR"], &rows)?;
    Ok(())
}

async fn save_user<S: KeyValueStore>(
    ctx: &mut Context<S>,
    out: &mut dyn Write,
    mut form: UserForm,
    args: UserArgs,
) -> CommandResult {
    require_role(ctx, Role::Admin)?;
    let fallback = form.fallback_message();
    if let Some(username) = args.username {
        form.username = username;
    }
    if let Some(email) = args.email {
        form.email = email;
    }
    if let Some(password) = args.password {
        form.password = password;
    }
    if let Some(role) = args.role {
        form.role = validation::role(&role).map_err(fail(fallback))?;
    }
    let notice = form.submit(&ctx.api).await.map_err(fail(fallback))?;
    print_notice(out, &notice)?;
    Ok(())
}

async fn assign<S: KeyValueStore>(
    ctx: &mut Context<S>,
    out: &mut dyn Write,
    mentee_id: &str,
    mentor_id: &str,
) -> CommandResult {
    let admin = require_role(ctx, Role::Admin)?;
    let mut board = load_board(ctx).await?;
    let notice = board
        .assign(&ctx.api, Some(&admin.id), mentee_id, mentor_id)
        .await
        .map_err(fail(assignment::ASSIGN_FAILED))?;
    print_notice(out, &notice)?;
    Ok(())
}

async fn matches<S: KeyValueStore>(ctx: &mut Context<S>, out: &mut dyn Write) -> CommandResult {
    require_role(ctx, Role::Admin)?;
    let mut board = AssignmentBoard::new();
    board
        .refresh_matches(&ctx.api)
        .await
        .map_err(fail(assignment::MATCHES_FAILED))?;
    print_header(out, "Mentorship matches")?;
    if board.matches().is_empty() {
        print_empty(out, "matches")?;
        return Ok(());
    }
    let rows: Vec<Vec<String>> = board
        .matches()
        .iter()
        .map(|m| {
            vec![
                format!("{} ({})", m.mentor_username, m.mentor_email),
                format!("{} ({})", m.mentee_username, m.mentee_email),
            ]
        })
        .collect();
    print_table(out, &["MENTOR", "MENTEE"], &rows)?;
    Ok(())
}

async fn stats<S: KeyValueStore>(ctx: &mut Context<S>, out: &mut dyn Write) -> CommandResult {
    require_role(ctx, Role::Admin)?;
    let total = sessions::admin_total_sessions(&ctx.api)
        .await
        .map_err(fail(sessions::ADMIN_LOAD_FAILED))?;
    let mut board = AssignmentBoard::new();
    board
        .load(&ctx.api)
        .await
        .map_err(fail(assignment::LOAD_FAILED))?;

    print_header(out, "Platform")?;
    print_fields(
        out,
        &[
            ("Mentors", board.mentors().len().to_string()),
            ("Mentees", board.mentees().len().to_string()),
            ("Sessions", total.to_string()),
        ],
    )?;
    Ok(())
}

async fn mentors<S: KeyValueStore>(
    ctx: &mut Context<S>,
    out: &mut dyn Write,
    skill: String,
    industry: String,
) -> CommandResult {
    require_role(ctx, Role::Mentee)?;
    let mut browser = MentorBrowser::with_filters(skill, industry);
    browser
        .search(&ctx.api)
        .await
        .map_err(fail(browse::SEARCH_FAILED))?;

    print_header(out, "Mentors")?;
    if browser.mentors().is_empty() {
        print_empty(out, "mentors match these filters")?;
        return Ok(());
    }
    let rows: Vec<Vec<String>> = browser
        .mentors()
        .iter()
        .map(|m| {
            vec![
                m.id.clone(),
                m.username.clone(),
                m.industry.clone().unwrap_or_default(),
                m.skills.join(", "),
                browser.action_for(&m.id).label().to_string(),
            ]
        })
        .collect();
    print_table(out, &["ID", "MENTOR", "INDUSTRY", "SKILLS", "STATUS"], &rows)?;
    Ok(())
}

async fn request<S: KeyValueStore>(
    ctx: &mut Context<S>,
    out: &mut dyn Write,
    mentor_id: &str,
) -> CommandResult {
    require_role(ctx, Role::Mentee)?;
    let mut browser = MentorBrowser::new();
    if let Err(e) = browser.refresh_statuses(&ctx.api).await {
        tracing::warn!("Could not fetch request statuses: {}", e);
    }
    let notice = browser
        .request(&ctx.api, mentor_id)
        .await
        .map_err(fail(browse::REQUEST_FAILED))?;
    print_notice(out, &notice)?;
    Ok(())
}

async fn load_inbox<S: KeyValueStore>(ctx: &Context<S>) -> Result<RequestInbox, CommandFailure> {
    let mentor = require_role(ctx, Role::Mentor)?;
    let mut inbox = RequestInbox::new();
    inbox
        .load(&ctx.api, &mentor.role_id)
        .await
        .map_err(fail(inbox::LOAD_FAILED))?;
    Ok(inbox)
}

async fn requests<S: KeyValueStore>(ctx: &mut Context<S>, out: &mut dyn Write) -> CommandResult {
    let inbox = load_inbox(ctx).await?;
    print_header(out, "Mentorship requests")?;
    if inbox.requests().is_empty() {
        print_empty(out, "requests")?;
        return Ok(());
    }
    let rows: Vec<Vec<String>> = inbox
        .requests()
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.mentee_name.clone().unwrap_or_default(),
                r.mentee_email.clone().unwrap_or_default(),
                r.goals.clone().unwrap_or_default(),
                r.status.to_string(),
            ]
        })
        .collect();
    print_table(out, &["ID", "MENTEE", "EMAIL", "GOALS", "STATUS"], &rows)?;
    Ok(())
}

async fn assigned_mentees<S: KeyValueStore>(
    ctx: &mut Context<S>,
    out: &mut dyn Write,
) -> CommandResult {
    require_role(ctx, Role::Mentor)?;
    let mut roster = MenteeRoster::new();
    roster
        .refresh(&ctx.api)
        .await
        .map_err(fail(mentees::LOAD_FAILED))?;
    print_header(out, "Assigned mentees")?;
    if roster.mentees().is_empty() {
        print_empty(out, "assigned mentees")?;
        return Ok(());
    }
    let rows: Vec<Vec<String>> = roster
        .mentees()
        .iter()
        .map(|m| {
            vec![
                m.id.clone(),
                m.username.clone(),
                m.email.clone(),
                m.industry.clone().unwrap_or_default(),
                m.experience.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(out, &["ID", "MENTEE", "EMAIL", "INDUSTRY", "EXPERIENCE"], &rows)?;
    Ok(())
}

fn print_availability(out: &mut dyn Write, editor: &AvailabilityEditor) -> io::Result<()> {
    if editor.rows().is_empty() {
        return print_empty(out, "availability set");
    }
    let show = |t: Option<crate::models::TimeOfDay>| t.map(|t| t.to_string()).unwrap_or_default();
    let rows: Vec<Vec<String>> = editor
        .rows()
        .iter()
        .map(|r| vec![r.day.to_string(), show(r.start), show(r.end)])
        .collect();
    print_table(out, &["DAY", "START", "END"], &rows)
}

async fn show_availability<S: KeyValueStore>(ctx: &mut Context<S>, out: &mut dyn Write) -> CommandResult {
    require_role(ctx, Role::Mentor)?;
    let mut editor = AvailabilityEditor::new();
    editor
        .load(&ctx.api)
        .await
        .map_err(fail(availability::LOAD_FAILED))?;
    print_header(out, "Weekly availability")?;
    print_availability(out, &editor)?;
    Ok(())
}

/// Replace the weekly availability with exactly the given days.
async fn set_availability<S: KeyValueStore>(
    ctx: &mut Context<S>,
    out: &mut dyn Write,
    days: &[DaySpec],
) -> CommandResult {
    require_role(ctx, Role::Mentor)?;
    let mut editor = AvailabilityEditor::new();
    for spec in days {
        let day = validation::weekday(&spec.day).map_err(fail(availability::SAVE_FAILED))?;
        editor
            .set_day(day, &spec.start, &spec.end)
            .map_err(fail(availability::SAVE_FAILED))?;
    }

    match editor.save(&ctx.api).await {
        Ok(notice) => {
            print_notice(out, &notice)?;
            print_availability(out, &editor)?;
            Ok(())
        }
        Err(err) => Err(CommandFailure {
            notice: availability::save_failure_notice(&err),
            source: Some(err),
            show_usage: false,
        }),
    }
}

async fn list_sessions<S: KeyValueStore>(ctx: &mut Context<S>, out: &mut dyn Write) -> CommandResult {
    let user = ctx
        .session
        .require_user()
        .cloned()
        .map_err(fail("Not logged in"))?;
    let mut listing = SessionListing::new(SessionScope::from(user.role));
    let fallback = listing.fallback_message();
    listing.refresh(&ctx.api).await.map_err(fail(fallback))?;

    print_header(out, "Upcoming sessions")?;
    if listing.sessions().is_empty() {
        print_empty(out, "sessions")?;
        return Ok(());
    }
    let rows: Vec<Vec<String>> = listing
        .sessions()
        .iter()
        .map(|s| {
            vec![
                s.display_date(),
                format!("{}-{}", s.start_time, s.end_time),
                s.counterpart(),
            ]
        })
        .collect();
    print_table(out, &["DATE", "TIME", "WITH"], &rows)?;
    Ok(())
}

async fn update_profile<S: KeyValueStore>(
    ctx: &mut Context<S>,
    out: &mut dyn Write,
    args: ProfileArgs,
) -> CommandResult {
    let user = ctx
        .session
        .require_user()
        .cloned()
        .map_err(fail(profile::UPDATE_FAILED))?;
    let mut form = ProfileForm::from_user(&user);
    let ProfileArgs {
        bio,
        goals,
        skills,
        industry,
        experience,
        availability,
    } = args;
    let fields = [
        (&mut form.short_bio, bio),
        (&mut form.goals, goals),
        (&mut form.skills, skills),
        (&mut form.industry, industry),
        (&mut form.experience, experience),
        (&mut form.availability, availability),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            *field = value;
        }
    }

    let (notice, destination) = form
        .submit(&ctx.api, &mut ctx.session)
        .await
        .map_err(fail(profile::UPDATE_FAILED))?;
    print_notice(out, &notice)?;
    writeln!(out, "  Next: {}", destination.path())?;
    Ok(())
}
