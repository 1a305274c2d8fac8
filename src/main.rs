use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use std::io;
use std::path::PathBuf;
use std::process;

use gogist::commands::{self, Login, NewArgs};
use gogist::config::{Config, ENV_FILE};
use gogist::prompt::value_or_prompt;
use gogist::GistError;

fn clap<'a, 'b>() -> App<'a, 'b> {
    let user = Arg::with_name("user")
        .long("user")
        .short("u")
        .takes_value(true);

    let login = SubCommand::with_name("login")
        .about("Authenticate with GitHub and store a gist-scoped token in $HOME/.gogist")
        .arg(user
                .clone()
                .help("Your GitHub username or email address (prompted for if omitted)"))
        .arg(Arg::with_name("pass")
                .long("pass")
                .short("p")
                .takes_value(true)
                .help("Your GitHub password (prompted for if omitted)"))
        .arg(Arg::with_name("otp")
                .long("otp")
                .short("o")
                .takes_value(true)
                .help("Your one time password, required when two-factor authentication is enabled"))
        .arg(Arg::with_name("token")
                .long("token")
                .takes_value(true)
                .conflicts_with_all(&["user", "pass", "otp"])
                .help("Store an existing personal access token instead of creating one"));

    let list = SubCommand::with_name("list")
        .about("Print the URL of each gist, one per line")
        .arg(user.help(
            "List this user's public gists instead of all of the authenticated user's gists",
        ));

    let new = SubCommand::with_name("new")
        .about("Create a gist from stdin or from files and print its URL")
        .arg(Arg::with_name("public")
                .long("public")
                .short("p")
                .help("Make the gist public"))
        .arg(Arg::with_name("name")
                .long("name")
                .short("n")
                .takes_value(true)
                .help("File name for stdin content, ignored if --file, --dir or --glob is given"))
        .arg(Arg::with_name("desc")
                .long("desc")
                .short("d")
                .takes_value(true)
                .help("Gist description"))
        .arg(Arg::with_name("file")
                .long("file")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("Add this file to the gist. Pass multiple times"))
        .arg(Arg::with_name("dir")
                .long("dir")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("Add every file directly inside this directory. Pass multiple times"))
        .arg(Arg::with_name("glob")
                .long("glob")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .help("Add every file matching this pattern. Pass multiple times"));

    App::new("gogist")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A command line tool for GitHub gists")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::DisableHelpSubcommand)
        .arg(Arg::with_name("verbose")
                .long("verbose")
                .short("v")
                .global(true)
                .help("Log debug output to stderr"))
        .arg(Arg::with_name("token-file")
                .long("token-file")
                .value_name("PATH")
                .takes_value(true)
                .global(true)
                .help("Token file to use instead of $GOGIST_TOKEN_PATH or $HOME/.gogist"))
        .subcommand(login)
        .subcommand(list)
        .subcommand(new)
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn get_values(m: &ArgMatches, name: &str) -> Vec<String> {
    match m.values_of(name) {
        Some(values) => values.map(String::from).collect(),
        None => vec![],
    }
}

fn get_paths(m: &ArgMatches, name: &str) -> Vec<PathBuf> {
    get_values(m, name).into_iter().map(PathBuf::from).collect()
}

fn login_from(m: &ArgMatches) -> Result<Login, GistError> {
    if let Some(token) = m.value_of("token") {
        return Ok(Login::Token(token.to_string()));
    }

    let user = value_or_prompt(m.value_of("user"), "username", false)?;
    let pass = value_or_prompt(m.value_of("pass"), "password", true)?;

    Ok(Login::Password {
        user,
        pass,
        otp: m.value_of("otp").map(String::from),
    })
}

async fn run(matches: &ArgMatches<'_>) -> Result<(), GistError> {
    let (name, sub) = matches.subcommand();
    let m = match sub {
        Some(m) => m,
        None => unreachable!("clap requires a subcommand"),
    };

    let token_file = m
        .value_of("token-file")
        .or_else(|| matches.value_of("token-file"))
        .map(PathBuf::from);
    let config = Config::from_env(token_file)?;
    log::debug!("using {:?}", config);

    match name {
        "login" => commands::login(&config, login_from(m)?).await,

        "list" => commands::list(&config, m.value_of("user"), &mut io::stdout()).await,

        "new" => {
            let args = NewArgs {
                public: m.is_present("public"),
                name: m.value_of("name").map(String::from),
                description: m.value_of("desc").unwrap_or_default().to_string(),
                files: get_paths(m, "file"),
                dirs: get_paths(m, "dir"),
                globs: get_values(m, "glob"),
            };

            commands::new_gist(&config, args, io::stdin(), &mut io::stdout()).await
        }

        _ => panic!("Invalid subcommand."),
    }
}

#[tokio::main]
async fn main() {
    dotenvy::from_filename(ENV_FILE).ok();

    let matches = clap().get_matches();
    let verbose = matches.is_present("verbose")
        || matches.subcommand().1.map_or(false, |m| m.is_present("verbose"));
    init_logger(verbose);

    if let Err(e) = run(&matches).await {
        log::error!("{}", e);
        process::exit(e.exit_code());
    }
}
