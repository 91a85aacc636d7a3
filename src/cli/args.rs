//! Command-line argument parsing.
//!
//! Commands are positional (`mentorlink respond 4 accept`) with a few
//! `--flag value` options. Anything that does not parse becomes
//! [`CliCommand::Usage`] carrying the reason.

use crate::models::Decision;

/// `Day=HH:MM-HH:MM` from `availability set`, still as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySpec {
    pub day: String,
    pub start: String,
    pub end: String,
}

impl DaySpec {
    pub fn parse(raw: &str) -> Option<Self> {
        let (day, range) = raw.split_once('=')?;
        let (start, end) = range.split_once('-')?;
        Some(Self {
            day: day.trim().to_string(),
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileArgs {
    pub bio: Option<String>,
    pub goals: Option<String>,
    pub skills: Option<String>,
    pub industry: Option<String>,
    pub experience: Option<String>,
    pub availability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserArgs {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Version,
    Help,
    /// Bad arguments; the message says what was wrong.
    Usage(String),

    Login { email: String, password: String },
    Logout,
    Whoami,
    Register { username: String, email: String, password: String, role: String },
    ForgotPassword { email: String },
    ResetPassword { token: String, password: String },

    Users,
    AddUser(UserArgs),
    EditUser { id: String, changes: UserArgs },
    Assign { mentee_id: String, mentor_id: String },
    Matches,
    Stats,

    Mentors { skill: String, industry: String },
    Request { mentor_id: String },
    Book { mentor_id: String, date: String, start: String, end: String },

    Requests,
    Mentees,
    Respond { request_id: String, decision: Decision },
    AvailabilityShow,
    AvailabilitySet(Vec<DaySpec>),

    Sessions,
    Profile(ProfileArgs),
}

pub const USAGE: &str = "\
Usage: mentorlink <command> [args]

Account
  login <email> <password>
  logout
  whoami
  register <username> <email> <password> <admin|mentor|mentee>
  forgot-password <email>
  reset-password <token> <new-password>
  profile [--bio T] [--goals T] [--skills a,b] [--industry T] [--experience T] [--availability T]
  sessions

Admin
  users
  add-user --username U --email E --password P [--role R]
  edit-user <id> [--username U] [--email E] [--password P] [--role R]
  assign <mentee-id> <mentor-id>
  matches
  stats

Mentee
  mentors [--skill S] [--industry I]
  request <mentor-id>
  book <mentor-id> <YYYY-MM-DD> <HH:MM> <HH:MM>

Mentor
  requests
  mentees
  respond <request-id> accept|reject
  availability [show]
  availability set Day=HH:MM-HH:MM ...

  --version, -V    print version
  --help, -h       print this help
";

/// Split `--name value` pairs off the arguments. Unknown flags are an error.
fn take_flags(
    args: &[String],
    allowed: &[&str],
) -> Result<(Vec<String>, Vec<(String, String)>), String> {
    let mut positional = Vec::new();
    let mut flags = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(name) = arg.strip_prefix("--") {
            if !allowed.contains(&name) {
                return Err(format!("unknown option --{}", name));
            }
            let value = iter
                .next()
                .ok_or_else(|| format!("--{} needs a value", name))?;
            flags.push((name.to_string(), value.clone()));
        } else {
            positional.push(arg.clone());
        }
    }
    Ok((positional, flags))
}

fn flag(flags: &[(String, String)], name: &str) -> Option<String> {
    flags
        .iter()
        .rev()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.clone())
}

fn exact<const N: usize>(command: &str, args: &[String], names: [&str; N]) -> Result<[String; N], String> {
    if args.len() != N {
        return Err(format!(
            "{} expects {} argument(s): {}",
            command,
            N,
            names.join(" ")
        ));
    }
    Ok(std::array::from_fn(|i| args[i].clone()))
}

fn user_args(flags: &[(String, String)]) -> UserArgs {
    UserArgs {
        username: flag(flags, "username"),
        email: flag(flags, "email"),
        password: flag(flags, "password"),
        role: flag(flags, "role"),
    }
}

fn parse_command(command: &str, rest: &[String]) -> Result<CliCommand, String> {
    const USER_FLAGS: [&str; 4] = ["username", "email", "password", "role"];

    let cmd = match command {
        "--version" | "-V" | "version" => CliCommand::Version,
        "--help" | "-h" | "help" => CliCommand::Help,
        "login" => {
            let [email, password] = exact(command, rest, ["<email>", "<password>"])?;
            CliCommand::Login { email, password }
        }
        "logout" => {
            exact(command, rest, [])?;
            CliCommand::Logout
        }
        "whoami" => {
            exact(command, rest, [])?;
            CliCommand::Whoami
        }
        "register" => {
            let [username, email, password, role] =
                exact(command, rest, ["<username>", "<email>", "<password>", "<role>"])?;
            CliCommand::Register { username, email, password, role }
        }
        "forgot-password" => {
            let [email] = exact(command, rest, ["<email>"])?;
            CliCommand::ForgotPassword { email }
        }
        "reset-password" => {
            let [token, password] = exact(command, rest, ["<token>", "<new-password>"])?;
            CliCommand::ResetPassword { token, password }
        }
        "users" => {
            exact(command, rest, [])?;
            CliCommand::Users
        }
        "add-user" => {
            let (positional, flags) = take_flags(rest, &USER_FLAGS)?;
            exact(command, &positional, [])?;
            CliCommand::AddUser(user_args(&flags))
        }
        "edit-user" => {
            let (positional, flags) = take_flags(rest, &USER_FLAGS)?;
            let [id] = exact(command, &positional, ["<id>"])?;
            CliCommand::EditUser { id, changes: user_args(&flags) }
        }
        "assign" => {
            let [mentee_id, mentor_id] = exact(command, rest, ["<mentee-id>", "<mentor-id>"])?;
            CliCommand::Assign { mentee_id, mentor_id }
        }
        "matches" => {
            exact(command, rest, [])?;
            CliCommand::Matches
        }
        "stats" => {
            exact(command, rest, [])?;
            CliCommand::Stats
        }
        "mentors" => {
            let (positional, flags) = take_flags(rest, &["skill", "industry"])?;
            exact(command, &positional, [])?;
            CliCommand::Mentors {
                skill: flag(&flags, "skill").unwrap_or_default(),
                industry: flag(&flags, "industry").unwrap_or_default(),
            }
        }
        "request" => {
            let [mentor_id] = exact(command, rest, ["<mentor-id>"])?;
            CliCommand::Request { mentor_id }
        }
        "book" => {
            let [mentor_id, date, start, end] =
                exact(command, rest, ["<mentor-id>", "<date>", "<start>", "<end>"])?;
            CliCommand::Book { mentor_id, date, start, end }
        }
        "requests" => {
            exact(command, rest, [])?;
            CliCommand::Requests
        }
        "mentees" => {
            exact(command, rest, [])?;
            CliCommand::Mentees
        }
        "respond" => {
            let [request_id, decision] = exact(command, rest, ["<request-id>", "accept|reject"])?;
            let decision = Decision::parse(&decision)
                .ok_or_else(|| format!("expected accept or reject, got '{}'", decision))?;
            CliCommand::Respond { request_id, decision }
        }
        "availability" => match rest.split_first() {
            None => CliCommand::AvailabilityShow,
            Some((sub, days)) if sub == "show" && days.is_empty() => CliCommand::AvailabilityShow,
            Some((sub, days)) if sub == "set" => {
                let specs = days
                    .iter()
                    .map(|raw| {
                        DaySpec::parse(raw)
                            .ok_or_else(|| format!("expected Day=HH:MM-HH:MM, got '{}'", raw))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                CliCommand::AvailabilitySet(specs)
            }
            Some(_) => return Err("availability expects 'show' or 'set Day=HH:MM-HH:MM ...'".into()),
        },
        "sessions" => {
            exact(command, rest, [])?;
            CliCommand::Sessions
        }
        "profile" => {
            let (positional, flags) = take_flags(
                rest,
                &["bio", "goals", "skills", "industry", "experience", "availability"],
            )?;
            exact(command, &positional, [])?;
            CliCommand::Profile(ProfileArgs {
                bio: flag(&flags, "bio"),
                goals: flag(&flags, "goals"),
                skills: flag(&flags, "skills"),
                industry: flag(&flags, "industry"),
                experience: flag(&flags, "experience"),
                availability: flag(&flags, "availability"),
            })
        }
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(cmd)
}

/// Parse command-line arguments, program name first.
///
/// ```
/// use mentorlink::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["mentorlink".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let args: Vec<String> = args.skip(1).collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        return CliCommand::Version;
    }
    if args.iter().any(|a| a == "--help" || a == "-h") {
        return CliCommand::Help;
    }
    let Some((command, rest)) = args.split_first() else {
        return CliCommand::Help;
    };
    parse_command(command, rest).unwrap_or_else(CliCommand::Usage)
}
