use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use placement::config::{AppConfig, DataConfig};
use placement::domain::{
    Application, Capability, Internship, InternshipLevel, User, Withdrawal,
};
use placement::error::AppError;
use placement::services::{
    change_password, export_csv, listings, login, register_representative, InternshipDraft,
    RegistrationRequest, RepresentativeDesk, StaffDesk, StudentDesk,
};
use placement::{telemetry, InternshipFilter, Portal};
use tracing::info;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(
    name = "placement",
    about = "Manage internship postings, applications, and representative approvals",
    version
)]
struct Cli {
    /// Directory holding the CSV data files (overrides PLACEMENT_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Account id used to sign in
    #[arg(long, global = true)]
    user: Option<String>,
    /// Password for --user
    #[arg(long, global = true)]
    password: Option<String>,
    /// Evaluation date for opening windows (defaults to today)
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register as a company representative (pending staff approval)
    Register(RegisterArgs),
    /// Sign in and show the account and its permissions
    Login,
    /// Change the signed-in account's password
    Password {
        #[arg(long)]
        new_password: String,
    },
    /// Review company representative registrations
    Reps {
        #[command(subcommand)]
        command: RepsCommand,
    },
    /// Browse, post, and review internships
    Internships {
        #[command(subcommand)]
        command: InternshipsCommand,
    },
    /// Inspect and decide applications
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
    /// Request and review withdrawals
    Withdrawals {
        #[command(subcommand)]
        command: WithdrawalsCommand,
    },
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    name: String,
    #[arg(long = "new-password")]
    new_password: String,
    #[arg(long)]
    company: String,
    #[arg(long, default_value = "")]
    department: String,
    #[arg(long, default_value = "")]
    position: String,
}

#[derive(Subcommand, Debug)]
enum RepsCommand {
    /// List registrations awaiting review
    Pending,
    Approve { id: String },
    Reject { id: String },
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Statuses to include (comma separated)
    #[arg(long = "status", value_delimiter = ',')]
    statuses: Vec<String>,
    /// Levels to include (comma separated)
    #[arg(long = "level", value_delimiter = ',')]
    levels: Vec<String>,
    /// Companies to include (comma separated)
    #[arg(long = "company", value_delimiter = ',')]
    companies: Vec<String>,
    /// Preferred majors to include (comma separated)
    #[arg(long = "major", value_delimiter = ',')]
    majors: Vec<String>,
}

impl FilterArgs {
    fn into_filter(self) -> InternshipFilter {
        InternshipFilter::new()
            .with_statuses(self.statuses)
            .with_levels(self.levels)
            .with_companies(self.companies)
            .with_majors(self.majors)
    }
}

#[derive(Subcommand, Debug)]
enum InternshipsCommand {
    /// List every internship through the given filters
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Also write the listing to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// List postings awaiting staff review
    Pending,
    Approve { id: Uuid },
    Reject { id: Uuid },
    /// Summarise the filtered internships
    Report {
        #[command(flatten)]
        filter: FilterArgs,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Post a new internship
    Create(CreateArgs),
    /// Show or hide an approved posting
    Visibility {
        id: Uuid,
        #[arg(long, conflicts_with = "hide", required_unless_present = "hide")]
        show: bool,
        #[arg(long)]
        hide: bool,
    },
    /// List the signed-in representative's postings
    Mine,
    /// List internships the signed-in student may apply to
    Eligible {
        #[command(flatten)]
        filter: FilterArgs,
    },
    Apply { id: Uuid },
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long)]
    title: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long, value_parser = parse_level)]
    level: InternshipLevel,
    #[arg(long)]
    major: String,
    #[arg(long, value_parser = parse_date)]
    opening: NaiveDate,
    #[arg(long, value_parser = parse_date)]
    closing: NaiveDate,
    #[arg(long)]
    slots: u8,
}

#[derive(Subcommand, Debug)]
enum ApplicationsCommand {
    /// Students see their own applications; representatives pass --internship
    List {
        #[arg(long)]
        internship: Option<Uuid>,
    },
    /// Mark a pending application successful or unsuccessful
    Decide {
        internship: Uuid,
        student: String,
        #[arg(long, conflicts_with = "reject", required_unless_present = "reject")]
        accept: bool,
        #[arg(long)]
        reject: bool,
    },
}

#[derive(Subcommand, Debug)]
enum WithdrawalsCommand {
    /// List withdrawal requests awaiting review
    Pending,
    Approve { internship: Uuid, student: String },
    Reject { internship: Uuid, student: String },
    Request { internship: Uuid },
    /// List the signed-in student's withdrawal requests
    Mine,
}

impl Command {
    fn action(&self) -> &'static str {
        match self {
            Command::Register(_) => "register",
            Command::Login => "sign in",
            Command::Password { .. } => "change password",
            Command::Reps { command } => match command {
                RepsCommand::Pending => "list pending representatives",
                RepsCommand::Approve { .. } => "approve representative",
                RepsCommand::Reject { .. } => "reject representative",
            },
            Command::Internships { command } => match command {
                InternshipsCommand::List { .. } => "list internships",
                InternshipsCommand::Pending => "list pending internships",
                InternshipsCommand::Approve { .. } => "approve internship",
                InternshipsCommand::Reject { .. } => "reject internship",
                InternshipsCommand::Report { .. } => "generate report",
                InternshipsCommand::Create(_) => "create internship",
                InternshipsCommand::Visibility { .. } => "change visibility",
                InternshipsCommand::Mine => "list postings",
                InternshipsCommand::Eligible { .. } => "list eligible internships",
                InternshipsCommand::Apply { .. } => "apply",
            },
            Command::Applications { command } => match command {
                ApplicationsCommand::List { .. } => "list applications",
                ApplicationsCommand::Decide { .. } => "decide application",
            },
            Command::Withdrawals { command } => match command {
                WithdrawalsCommand::Pending => "list pending withdrawals",
                WithdrawalsCommand::Approve { .. } => "approve withdrawal",
                WithdrawalsCommand::Reject { .. } => "reject withdrawal",
                WithdrawalsCommand::Request { .. } => "request withdrawal",
                WithdrawalsCommand::Mine => "list withdrawals",
            },
        }
    }

    /// Permission checked against the signed-in account before dispatch.
    fn capability(&self) -> Option<Capability> {
        match self {
            Command::Register(_) | Command::Login => None,
            Command::Password { .. } => Some(Capability::ChangePassword),
            Command::Reps { .. } => Some(Capability::ReviewRepresentatives),
            Command::Internships { command } => Some(command.capability()),
            Command::Applications { command } => Some(command.capability()),
            Command::Withdrawals { command } => Some(command.capability()),
        }
    }
}

impl InternshipsCommand {
    fn capability(&self) -> Capability {
        match self {
            InternshipsCommand::List { .. } => Capability::BrowseInternships,
            InternshipsCommand::Pending
            | InternshipsCommand::Approve { .. }
            | InternshipsCommand::Reject { .. } => Capability::ReviewInternships,
            InternshipsCommand::Report { .. } => Capability::GenerateReports,
            InternshipsCommand::Create(_)
            | InternshipsCommand::Visibility { .. }
            | InternshipsCommand::Mine => Capability::ManagePostings,
            InternshipsCommand::Eligible { .. } | InternshipsCommand::Apply { .. } => {
                Capability::ApplyForInternships
            }
        }
    }
}

impl ApplicationsCommand {
    fn capability(&self) -> Capability {
        match self {
            ApplicationsCommand::List { internship: None } => Capability::ApplyForInternships,
            ApplicationsCommand::List { internship: Some(_) }
            | ApplicationsCommand::Decide { .. } => Capability::DecideApplications,
        }
    }
}

impl WithdrawalsCommand {
    fn capability(&self) -> Capability {
        match self {
            WithdrawalsCommand::Request { .. } | WithdrawalsCommand::Mine => {
                Capability::RequestWithdrawals
            }
            _ => Capability::ReviewWithdrawals,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let action = cli.command.action();
    if let Err(err) = run(cli) {
        eprintln!("Failed to {action}: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    if let Some(dir) = cli.data_dir {
        config.data = DataConfig::new(dir);
    }
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    info!(
        environment = config.environment.label(),
        data_dir = %config.data.dir().display(),
        %today,
        "placement desk starting"
    );
    let mut portal = Portal::open(&config.data, config.policy)?;

    if let Command::Register(args) = cli.command {
        let rep = register_representative(
            &mut portal,
            RegistrationRequest {
                email: args.email,
                name: args.name,
                password: args.new_password,
                company_name: args.company,
                department: args.department,
                position: args.position,
            },
        )?;
        println!(
            "Registered {} for {}; awaiting career center approval.",
            rep.id, rep.company_name
        );
        return Ok(());
    }

    let (Some(user_id), Some(password)) = (cli.user, cli.password) else {
        return Err(AppError::MissingCredentials);
    };
    let mut user = login(&portal, &user_id, &password)?;

    if let Some(capability) = cli.command.capability() {
        if !user.can(capability) {
            return Err(AppError::Forbidden(capability));
        }
        info!(user_id = user.id(), capability = capability.label(), "command authorised");
    }

    match cli.command {
        Command::Register(_) => Ok(()),
        Command::Login => {
            println!("Signed in as {} ({})", user.name(), user.role().label());
            println!("Permissions");
            for capability in user.role().capabilities() {
                println!("- {}", capability.label());
            }
            Ok(())
        }
        Command::Password { new_password } => {
            change_password(&mut portal, &mut user, &new_password)?;
            println!("Password updated.");
            Ok(())
        }
        Command::Reps { command } => run_reps(&mut portal, user, command),
        Command::Internships { command } => run_internships(&mut portal, user, command, today),
        Command::Applications { command } => run_applications(&mut portal, user, command),
        Command::Withdrawals { command } => run_withdrawals(&mut portal, user, command, today),
    }
}

fn run_reps(portal: &mut Portal, user: User, command: RepsCommand) -> Result<(), AppError> {
    let User::Staff(staff) = user else {
        return Err(AppError::Forbidden(Capability::ReviewRepresentatives));
    };
    let mut desk = StaffDesk::new(portal, staff);

    match command {
        RepsCommand::Pending => {
            let pending = desk.pending_representatives();
            if pending.is_empty() {
                println!("No registrations awaiting review.");
            }
            for rep in pending {
                println!(
                    "- {} | {} | {} | {} {}",
                    rep.id, rep.name, rep.company_name, rep.department, rep.position
                );
            }
        }
        RepsCommand::Approve { id } => {
            let rep = desk.approve_representative(&id)?;
            println!("Representative {} is now {}.", rep.id, rep.status.label());
        }
        RepsCommand::Reject { id } => {
            let rep = desk.reject_representative(&id)?;
            println!("Representative {} is now {}.", rep.id, rep.status.label());
        }
    }
    Ok(())
}

fn run_internships(
    portal: &mut Portal,
    user: User,
    command: InternshipsCommand,
    today: NaiveDate,
) -> Result<(), AppError> {
    let required = command.capability();
    match (command, user) {
        (InternshipsCommand::List { filter, export }, user) => {
            let filter = filter.into_filter();
            let view = match user {
                User::Staff(staff) => StaffDesk::new(portal, staff).filtered_internships(&filter),
                User::Student(student) => {
                    StudentDesk::new(portal, student).eligible_internships(today, &filter)
                }
                User::Representative(_) => return Err(AppError::Forbidden(required)),
            };
            print_internships(&view);
            if let Some(path) = export {
                let file = File::create(&path)?;
                export_csv(&listings(portal, &view), BufWriter::new(file))?;
                println!("Exported {} internships to {}.", view.len(), path.display());
            }
        }
        (InternshipsCommand::Pending, User::Staff(staff)) => {
            print_internships(&StaffDesk::new(portal, staff).pending_internships());
        }
        (InternshipsCommand::Approve { id }, User::Staff(staff)) => {
            let internship = StaffDesk::new(portal, staff).approve_internship(id)?;
            println!("{} is now {}.", internship.title, internship.status.label());
        }
        (InternshipsCommand::Reject { id }, User::Staff(staff)) => {
            let internship = StaffDesk::new(portal, staff).reject_internship(id)?;
            println!("{} is now {}.", internship.title, internship.status.label());
        }
        (InternshipsCommand::Report { filter, json }, User::Staff(staff)) => {
            let report = StaffDesk::new(portal, staff).report(&filter.into_filter());
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.render());
            }
        }
        (InternshipsCommand::Create(args), User::Representative(rep)) => {
            let internship = RepresentativeDesk::new(portal, rep)?.create_internship(
                InternshipDraft {
                    title: args.title,
                    description: args.description,
                    level: args.level,
                    preferred_major: args.major,
                    opening_date: args.opening,
                    closing_date: args.closing,
                    slots: args.slots,
                },
            )?;
            println!(
                "Created {} ({}); awaiting staff approval.",
                internship.title, internship.id
            );
        }
        (InternshipsCommand::Visibility { id, show, .. }, User::Representative(rep)) => {
            let internship = RepresentativeDesk::new(portal, rep)?.set_visibility(id, show)?;
            println!(
                "{} is now {}.",
                internship.title,
                if internship.visible { "visible" } else { "hidden" }
            );
        }
        (InternshipsCommand::Mine, User::Representative(rep)) => {
            let desk = RepresentativeDesk::new(portal, rep)?;
            print_internships(&desk.my_internships());
        }
        (InternshipsCommand::Eligible { filter }, User::Student(student)) => {
            let desk = StudentDesk::new(portal, student);
            print_internships(&desk.eligible_internships(today, &filter.into_filter()));
        }
        (InternshipsCommand::Apply { id }, User::Student(student)) => {
            let application = StudentDesk::new(portal, student).apply(id, today)?;
            println!(
                "Applied for {} on {}.",
                application.internship_id, application.submitted_on
            );
        }
        _ => return Err(AppError::Forbidden(required)),
    }
    Ok(())
}

fn run_applications(
    portal: &mut Portal,
    user: User,
    command: ApplicationsCommand,
) -> Result<(), AppError> {
    let required = command.capability();
    match (command, user) {
        (ApplicationsCommand::List { internship: None }, User::Student(student)) => {
            print_applications(&StudentDesk::new(portal, student).my_applications());
        }
        (ApplicationsCommand::List { internship: Some(id) }, User::Representative(rep)) => {
            print_applications(&RepresentativeDesk::new(portal, rep)?.applications_for(id)?);
        }
        (
            ApplicationsCommand::Decide {
                internship,
                student,
                accept,
                ..
            },
            User::Representative(rep),
        ) => {
            let application = RepresentativeDesk::new(portal, rep)?
                .decide_application(internship, &student, accept)?;
            println!(
                "Application from {} is now {}.",
                application.user_id,
                application.status_label()
            );
        }
        _ => return Err(AppError::Forbidden(required)),
    }
    Ok(())
}

fn run_withdrawals(
    portal: &mut Portal,
    user: User,
    command: WithdrawalsCommand,
    today: NaiveDate,
) -> Result<(), AppError> {
    let required = command.capability();
    match (command, user) {
        (WithdrawalsCommand::Request { internship }, User::Student(student)) => {
            let withdrawal =
                StudentDesk::new(portal, student).request_withdrawal(internship, today)?;
            println!(
                "Withdrawal from {} requested; awaiting staff review.",
                withdrawal.internship_id
            );
        }
        (WithdrawalsCommand::Mine, User::Student(student)) => {
            let withdrawals = StudentDesk::new(portal, student).my_withdrawals();
            print_withdrawals(&withdrawals, "No withdrawals.");
        }
        (WithdrawalsCommand::Pending, User::Staff(staff)) => {
            print_withdrawals(
                &StaffDesk::new(portal, staff).pending_withdrawals(),
                "No withdrawals awaiting review.",
            );
        }
        (
            WithdrawalsCommand::Approve {
                internship,
                student,
            },
            User::Staff(staff),
        ) => {
            let withdrawal = StaffDesk::new(portal, staff).approve_withdrawal(internship, &student)?;
            println!(
                "Withdrawal for {} is now {}.",
                withdrawal.user_id,
                withdrawal.status_label()
            );
        }
        (
            WithdrawalsCommand::Reject {
                internship,
                student,
            },
            User::Staff(staff),
        ) => {
            let withdrawal = StaffDesk::new(portal, staff).reject_withdrawal(internship, &student)?;
            println!(
                "Withdrawal for {} is now {}.",
                withdrawal.user_id,
                withdrawal.status_label()
            );
        }
        _ => return Err(AppError::Forbidden(required)),
    }
    Ok(())
}

fn print_internships(internships: &[Internship]) {
    if internships.is_empty() {
        println!("No internships match.");
        return;
    }
    for internship in internships {
        println!(
            "- {} | {} | {} | {} | {} | {} slots | {} -> {} | {}",
            internship.id,
            internship.title,
            internship.company_name,
            internship.level.label(),
            internship.status.label(),
            internship.slots,
            internship.opening_date,
            internship.closing_date,
            if internship.visible { "visible" } else { "hidden" }
        );
    }
}

fn print_applications(applications: &[Application]) {
    if applications.is_empty() {
        println!("No applications.");
        return;
    }
    for application in applications {
        println!(
            "- {} | {} ({}) | {} year {} | submitted {} | {}",
            application.internship_id,
            application.name,
            application.user_id,
            application.major,
            application.year,
            application.submitted_on,
            application.status_label()
        );
    }
}

fn print_withdrawals(withdrawals: &[Withdrawal], empty: &str) {
    if withdrawals.is_empty() {
        println!("{empty}");
        return;
    }
    for withdrawal in withdrawals {
        println!(
            "- {} | {} ({}) | submitted {} | {}",
            withdrawal.internship_id,
            withdrawal.name,
            withdrawal.user_id,
            withdrawal.submitted_on,
            withdrawal.status_label()
        );
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_level(raw: &str) -> Result<InternshipLevel, String> {
    InternshipLevel::parse(raw)
        .ok_or_else(|| format!("unknown level '{raw}' (expected Basic, Intermediate, or Advanced)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_flags_split_on_commas() {
        let cli = Cli::try_parse_from([
            "placement",
            "--user",
            "sng001",
            "--password",
            "pw",
            "internships",
            "list",
            "--status",
            "Approved,Filled",
            "--major",
            "Computer Science",
        ])
        .expect("arguments parse");

        let Command::Internships {
            command: InternshipsCommand::List { filter, export },
        } = cli.command
        else {
            panic!("expected internships list");
        };
        assert!(export.is_none());
        let filter = filter.into_filter();
        assert_eq!(filter.statuses, vec!["Approved", "Filled"]);
        assert_eq!(filter.majors, vec!["Computer Science"]);
        assert!(filter.levels.is_empty());
    }

    #[test]
    fn create_parses_level_and_dates() {
        let cli = Cli::try_parse_from([
            "placement",
            "internships",
            "create",
            "--title",
            "Backend Intern",
            "--level",
            "advanced",
            "--major",
            "Computer Science",
            "--opening",
            "2025-01-01",
            "--closing",
            "2025-03-31",
            "--slots",
            "2",
        ])
        .expect("arguments parse");

        let Command::Internships {
            command: InternshipsCommand::Create(args),
        } = cli.command
        else {
            panic!("expected internships create");
        };
        assert_eq!(args.level, InternshipLevel::Advanced);
        assert_eq!(
            args.closing,
            NaiveDate::from_ymd_opt(2025, 3, 31).expect("valid date")
        );
    }

    #[test]
    fn invalid_values_are_rejected_by_the_parser() {
        assert!(Cli::try_parse_from([
            "placement",
            "internships",
            "create",
            "--title",
            "X",
            "--level",
            "expert",
            "--major",
            "CS",
            "--opening",
            "2025-01-01",
            "--closing",
            "2025-03-31",
            "--slots",
            "1",
        ])
        .is_err());
        assert!(Cli::try_parse_from(["placement", "internships", "apply", "not-a-uuid"]).is_err());
        assert!(Cli::try_parse_from([
            "placement",
            "applications",
            "decide",
            "11111111-1111-4111-8111-111111111111",
            "U2310001A",
            "--accept",
            "--reject",
        ])
        .is_err());
    }

    #[test]
    fn commands_map_to_capabilities() {
        let cli = Cli::try_parse_from(["placement", "reps", "pending"]).expect("parses");
        assert_eq!(
            cli.command.capability(),
            Some(Capability::ReviewRepresentatives)
        );
        assert_eq!(cli.command.action(), "list pending representatives");

        let cli = Cli::try_parse_from([
            "placement",
            "withdrawals",
            "request",
            "11111111-1111-4111-8111-111111111111",
        ])
        .expect("parses");
        assert_eq!(cli.command.capability(), Some(Capability::RequestWithdrawals));

        let cli = Cli::try_parse_from(["placement", "withdrawals", "mine"]).expect("parses");
        assert_eq!(cli.command.capability(), Some(Capability::RequestWithdrawals));
        assert_eq!(cli.command.action(), "list withdrawals");

        let cli = Cli::try_parse_from(["placement", "login"]).expect("parses");
        assert_eq!(cli.command.capability(), None);
    }
}
