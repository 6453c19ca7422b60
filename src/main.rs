//! ClothOp CLI - command-line companion for the Clothes Manager service

use clap::Parser;

mod checks;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod session;

use cli::material::{MaterialChanges, MaterialFilters};
use cli::order::OrderFilters;
use cli::store::StoreChanges;
use cli::{
    Cli, Commands, GlobalOptions, MaterialCommands, OrderCommands, SizeCommands, StoreCommands,
    UserCommands,
};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug);
    log::debug!("Debug mode enabled");

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { username, password } => cli::auth::login(&opts, username, password).await,
        Commands::Logout => cli::auth::logout(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Setup(args) => cli::auth::setup(&opts, args).await,
        Commands::ChangePassword {
            current,
            new_password,
        } => cli::auth::change_password(&opts, current, new_password).await,
        Commands::Dashboard => cli::dashboard::run(&opts).await,
        Commands::User(cmd) => match cmd {
            UserCommands::List => cli::user::list(&opts).await,
            UserCommands::Me => cli::user::me(&opts).await,
            UserCommands::Create {
                username,
                password,
                store_id,
                role,
                disabled,
            } => cli::user::create(&opts, username, password, store_id, role, disabled).await,
            UserCommands::Delete { user_id, yes } => cli::user::delete(&opts, user_id, yes).await,
        },
        Commands::Store(cmd) => match cmd {
            StoreCommands::List => cli::store::list(&opts).await,
            StoreCommands::Get { store_id } => cli::store::get(&opts, store_id).await,
            StoreCommands::Create {
                title,
                address,
                disabled,
            } => cli::store::create(&opts, title, address, disabled).await,
            StoreCommands::Edit {
                store_id,
                title,
                address,
                active,
            } => {
                let changes = StoreChanges {
                    title,
                    address,
                    active,
                };
                cli::store::edit(&opts, store_id, changes).await
            }
            StoreCommands::Delete { store_id, yes } => {
                cli::store::delete(&opts, store_id, yes).await
            }
        },
        Commands::Material(cmd) => match cmd {
            MaterialCommands::List {
                store,
                text,
                size_id,
                page,
            } => {
                let filters = MaterialFilters {
                    store,
                    text,
                    size_id,
                };
                cli::material::list(&opts, filters, page).await
            }
            MaterialCommands::Create {
                text,
                size_id,
                quantity,
                store_id,
            } => cli::material::create(&opts, text, size_id, quantity, store_id).await,
            MaterialCommands::Edit {
                material_id,
                text,
                size_id,
                quantity,
            } => {
                let changes = MaterialChanges {
                    text,
                    size_id,
                    quantity,
                };
                cli::material::edit(&opts, material_id, changes).await
            }
            MaterialCommands::Delete { material_id, yes } => {
                cli::material::delete(&opts, material_id, yes).await
            }
            MaterialCommands::Distribute {
                material_id,
                receiver_store_id,
                quantity,
            } => cli::material::distribute(&opts, material_id, receiver_store_id, quantity).await,
        },
        Commands::Size(SizeCommands::List) => cli::material::list_sizes(&opts).await,
        Commands::Order(cmd) => match cmd {
            OrderCommands::List {
                user_id,
                store_id,
                material,
                size,
                page,
            } => {
                let filters = OrderFilters {
                    user_id,
                    store_id,
                    material,
                    size,
                };
                cli::order::list(&opts, filters, page).await
            }
            OrderCommands::Create(fields) => cli::order::create(&opts, fields).await,
            OrderCommands::Edit { order_id, fields } => {
                cli::order::edit(&opts, order_id, fields).await
            }
            OrderCommands::Delete { order_id, yes } => {
                cli::order::delete(&opts, order_id, yes).await
            }
            OrderCommands::Check => cli::order::check(&opts).await,
        },
        Commands::Completion { shell } => cli::completions::run(shell),
    }
}
