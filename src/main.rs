use clap::{Arg, ArgAction, ArgMatches, Command};
use std::sync::Arc;

use chrono::{Datelike, Local};
use rpassword::read_password;

use trackrr::auth::{AuthService, User};
use trackrr::notes::{generate_note_id, Note, NoteStore};
use trackrr::router::LogNavigator;
use trackrr::storage::FileBackend;
use trackrr::utils::logging::initialize_logging;

fn main() {
    if let Err(e) = initialize_logging() {
        eprintln!("Warning: logging is unavailable: {}", e);
    }

    let backend = Arc::new(FileBackend::new(trackrr::DATA_DIR));
    let auth = AuthService::new(backend.clone(), Arc::new(LogNavigator));
    let notes = NoteStore::new(backend);

    // Define the command-line interface using clap
    let matches = Command::new("trackrr")
        .about("A personal tracker with accounts and daily notes")
        .subcommand(
            Command::new("register")
                .about("Register a new account")
                .arg(Arg::new("name").help("Your display name").required(true))
                .arg(Arg::new("email").help("Your email address").required(true)),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in and start a session")
                .arg(Arg::new("email").help("Your email address").required(true)),
        )
        .subcommand(
            Command::new("logout").about("End the current session").arg(
                Arg::new("stay")
                    .long("stay")
                    .help("Skip navigating back to the login view")
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(Command::new("whoami").about("Show the signed-in user"))
        .subcommand(
            Command::new("forgot-password")
                .about("Request a password reset token")
                .arg(Arg::new("email").help("The account's email address").required(true)),
        )
        .subcommand(
            Command::new("reset-password")
                .about("Reset a password using a token")
                .arg(Arg::new("email").help("The account's email address").required(true))
                .arg(Arg::new("token").help("The reset token you received").required(true)),
        )
        .subcommand(
            Command::new("note")
                .about("Manage daily notes")
                .subcommand(
                    Command::new("add")
                        .about("Add a note for a day")
                        .arg(Arg::new("title").help("The note title").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("Day the note belongs to (YYYY-MM-DD, defaults to today)")
                                .value_name("DATE"),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .help("Longer note text")
                                .value_name("TEXT"),
                        )
                        .arg(
                            Arg::new("time")
                                .long("time")
                                .help("Time of day, free-form")
                                .value_name("TIME"),
                        )
                        .arg(
                            Arg::new("location")
                                .long("location")
                                .help("Where it happens")
                                .value_name("PLACE"),
                        ),
                )
                .subcommand(
                    Command::new("list").about("List notes, newest first").arg(
                        Arg::new("this-month")
                            .long("this-month")
                            .help("Only show this month's notes")
                            .action(ArgAction::SetTrue),
                    ),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a note by id")
                        .arg(Arg::new("id").help("The note id").required(true)),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("register", sub_matches)) => handle_register(&auth, sub_matches),
        Some(("login", sub_matches)) => handle_login(&auth, sub_matches),
        Some(("logout", sub_matches)) => {
            auth.logout(!sub_matches.get_flag("stay"));
            println!("Logged out.");
        }
        Some(("whoami", _)) => match auth.current_user() {
            Some(user) => println!("{} <{}>", user.name, user.email),
            None => println!("Not signed in."),
        },
        Some(("forgot-password", sub_matches)) => {
            let email = sub_matches.get_one::<String>("email").unwrap();
            println!("{}", auth.forgot_password(email).message);
        }
        Some(("reset-password", sub_matches)) => handle_reset_password(&auth, sub_matches),
        Some(("note", sub_matches)) => handle_note_command(&auth, &notes, sub_matches),
        _ => println!("No command given. Use --help for usage."),
    }
}

/// Prompt for a password without echoing it
fn prompt_password(prompt: &str) -> Option<String> {
    println!("{}", prompt);
    match read_password() {
        Ok(password) => Some(password),
        Err(e) => {
            eprintln!("Failed to read password: {}", e);
            None
        }
    }
}

fn handle_register(auth: &AuthService, sub_matches: &ArgMatches) {
    let name = sub_matches.get_one::<String>("name").unwrap();
    let email = sub_matches.get_one::<String>("email").unwrap();

    let password = match prompt_password("Choose a password (at least 6 characters):") {
        Some(password) => password,
        None => return,
    };

    let response = auth.register(User {
        name: name.clone(),
        email: email.clone(),
        password,
    });
    println!("{}", response.message);
}

fn handle_login(auth: &AuthService, sub_matches: &ArgMatches) {
    let email = sub_matches.get_one::<String>("email").unwrap();

    let password = match prompt_password("Password:") {
        Some(password) => password,
        None => return,
    };

    println!("{}", auth.login(email, &password).message);
}

fn handle_reset_password(auth: &AuthService, sub_matches: &ArgMatches) {
    let email = sub_matches.get_one::<String>("email").unwrap();
    let token = sub_matches.get_one::<String>("token").unwrap();

    let new_password = match prompt_password("New password (at least 6 characters):") {
        Some(password) => password,
        None => return,
    };

    println!("{}", auth.reset_password(email, &new_password, token).message);
}

fn handle_note_command(auth: &AuthService, notes: &NoteStore, matches: &ArgMatches) {
    // Notes belong to the signed-in user's view of the tracker
    if !auth.is_logged_in() {
        println!("Please log in first.");
        return;
    }

    match matches.subcommand() {
        Some(("add", sub_matches)) => {
            let title = sub_matches.get_one::<String>("title").unwrap();
            let today = Local::now().format("%Y-%m-%d").to_string();
            let date = sub_matches
                .get_one::<String>("date")
                .cloned()
                .unwrap_or(today);

            let note = Note {
                id: generate_note_id(),
                title: title.clone(),
                date,
                time: sub_matches.get_one::<String>("time").cloned(),
                location: sub_matches.get_one::<String>("location").cloned(),
                description: sub_matches
                    .get_one::<String>("description")
                    .cloned()
                    .unwrap_or_default(),
                color: None,
                created_at: Local::now().to_rfc3339(),
                avatar_url: None,
            };
            let id = note.id.clone();
            notes.add(note);
            println!("Note added: {}", id);
        }
        Some(("list", sub_matches)) => {
            let all = notes.notes();
            if all.is_empty() {
                println!("No notes yet.");
                return;
            }

            let now = Local::now();
            let this_month_only = sub_matches.get_flag("this-month");
            for note in &all {
                if this_month_only && !note.falls_in_month(now.year(), now.month()) {
                    continue;
                }
                let place = note.location.as_deref().unwrap_or("-");
                println!(
                    "[{}] {}  {}  @ {}\n    {}",
                    note.id, note.date, note.title, place, note.description
                );
            }
            if this_month_only {
                println!(
                    "\n{} of {} notes this month.",
                    notes.count_for_month(now.year(), now.month()),
                    all.len()
                );
            }
        }
        Some(("delete", sub_matches)) => {
            let id = sub_matches.get_one::<String>("id").unwrap();
            notes.delete(id);
            println!("Note deleted: {}", id);
        }
        _ => println!("Unknown note command. Use 'note --help' for usage."),
    }
}
