//! `licctl` — admin console for the license service.
//!
//! Manages contexts, authentication, orders, licenses, and activation
//! modes. Think of it as `kubectl` for the license service.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use licctl_core::{OrderQuery, ReviewDecision};

/// License service CLI.
#[derive(Parser, Debug)]
#[command(name = "licctl", about = "License service admin console")]
struct Cli {
    /// Path to client config file (default: ~/.licctl/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage contexts (named server connections).
    #[command(name = "context")]
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Switch the current context.
    #[command(name = "use")]
    Use {
        #[command(subcommand)]
        what: UseWhat,
    },

    /// Login to the current context's server.
    Login {
        /// Username.
        #[arg(long)]
        user: Option<String>,
        /// Password (not recommended — use interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Logout — clear token from current context.
    Logout,

    /// Get resource(s).
    Get {
        #[command(subcommand)]
        what: GetWhat,
    },

    /// Create a resource.
    Create {
        #[command(subcommand)]
        what: CreateWhat,
    },

    /// Review a pending order.
    Review {
        /// Order ID.
        order_id: i64,
        /// Approve the order.
        #[arg(long, conflicts_with = "reject")]
        approve: bool,
        /// Reject the order.
        #[arg(long)]
        reject: bool,
        /// Review notes (mandatory).
        #[arg(long)]
        notes: String,
    },

    /// License activation management.
    Activation {
        #[command(subcommand)]
        action: ActivationAction,
    },

    /// Show the lifecycle timeline of a license.
    Timeline {
        /// License ID.
        license_id: String,
    },

    /// Check server status.
    Status,

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ContextAction {
    /// Create a new context.
    Create {
        /// Context name.
        name: String,
        /// Server base URL.
        #[arg(long)]
        server: Option<String>,
    },
    /// List all contexts.
    List,
    /// Set properties on a context.
    Set {
        name: String,
        #[arg(long)]
        server: Option<String>,
    },
    /// Delete a context.
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum UseWhat {
    /// Switch to a context.
    Context { name: String },
}

#[derive(Subcommand, Debug)]
enum GetWhat {
    /// List orders.
    Orders {
        /// Filter by PO number.
        #[arg(long = "po-number")]
        po_number: Option<String>,
        /// Filter by customer name.
        #[arg(long)]
        customer: Option<String>,
        /// Filter by order status (pending/approved/rejected/completed).
        #[arg(long)]
        status: Option<String>,
        /// Filter by order source (api/manual/partner).
        #[arg(long)]
        source: Option<String>,
        /// Limit results.
        #[arg(long, default_value = "10")]
        limit: usize,
        /// Offset for pagination.
        #[arg(long, default_value = "0")]
        offset: usize,
    },
    /// Get a single order.
    Order {
        /// Order ID.
        id: Option<i64>,
        /// Look up by PO number instead.
        #[arg(long)]
        po: Option<String>,
    },
    /// Get a single license.
    License {
        /// License ID.
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum CreateWhat {
    /// Create an order (manual entry).
    Order {
        /// JSON body.
        #[arg(long = "json")]
        json_body: Option<String>,
        /// Read JSON from file.
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ActivationAction {
    /// Show activation state.
    Info {
        /// License ID.
        license_id: String,
    },
    /// Show activation change history.
    History {
        /// License ID.
        license_id: String,
    },
    /// Toggle the activation mode (ONLINE <-> OFFLINE).
    Switch {
        /// License ID.
        license_id: String,
        /// Cluster ID (required when switching to OFFLINE).
        #[arg(long = "cluster-id")]
        cluster_id: Option<String>,
        /// Reason for the change.
        #[arg(long)]
        reason: Option<String>,
    },
    /// Regenerate the offline activation code.
    Regenerate {
        /// License ID.
        license_id: String,
        /// Cluster ID to bind the new code to.
        #[arg(long = "cluster-id")]
        cluster_id: String,
        /// Reason for the regeneration.
        #[arg(long)]
        reason: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);
    let json_output = cli.output == "json";

    match cli.command {
        Commands::Context { action } => match action {
            ContextAction::Create { name, server } => {
                commands::context::create(&name, server.as_deref(), &config_path)?;
            }
            ContextAction::List => {
                commands::context::list(&config_path)?;
            }
            ContextAction::Set { name, server } => {
                commands::context::set(&name, server.as_deref(), &config_path)?;
            }
            ContextAction::Delete { name } => {
                commands::context::delete(&name, &config_path)?;
            }
        },

        Commands::Use { what } => match what {
            UseWhat::Context { name } => {
                commands::context::use_context(&name, &config_path)?;
            }
        },

        Commands::Login { user, password } => {
            let username = user.unwrap_or_else(|| {
                eprint!("Username: ");
                let mut s = String::new();
                let _ = std::io::stdin().read_line(&mut s);
                s.trim().to_string()
            });
            let password = password.unwrap_or_else(|| {
                rpassword::prompt_password("Password: ").unwrap_or_default()
            });
            commands::login::login(&username, &password, &config_path)?;
        }

        Commands::Logout => {
            commands::login::logout(&config_path)?;
        }

        Commands::Get { what } => match what {
            GetWhat::Orders {
                po_number,
                customer,
                status,
                source,
                limit,
                offset,
            } => {
                let query = OrderQuery {
                    skip: offset,
                    limit,
                    po_number,
                    customer_name: customer,
                    order_status: status.as_deref().map(|s| s.parse()).transpose()?,
                    order_source: source.as_deref().map(|s| s.parse()).transpose()?,
                };
                commands::orders::list(&query, json_output, &config_path)?;
            }
            GetWhat::Order { id, po } => {
                commands::orders::get(id, po.as_deref(), json_output, &config_path)?;
            }
            GetWhat::License { id } => {
                commands::licenses::get(&id, json_output, &config_path)?;
            }
        },

        Commands::Create { what } => match what {
            CreateWhat::Order { json_body, file } => {
                let body = if let Some(path) = file {
                    std::fs::read_to_string(&path)?
                } else if let Some(json) = json_body {
                    json
                } else {
                    anyhow::bail!("Provide --json or -f <file>.");
                };
                commands::orders::create(&body, json_output, &config_path)?;
            }
        },

        Commands::Review {
            order_id,
            approve,
            reject,
            notes,
        } => {
            let decision = match (approve, reject) {
                (true, false) => ReviewDecision::Approve,
                (false, true) => ReviewDecision::Reject,
                _ => anyhow::bail!("Pass exactly one of --approve or --reject."),
            };
            commands::orders::review(order_id, decision, &notes, json_output, &config_path)?;
        }

        Commands::Activation { action } => match action {
            ActivationAction::Info { license_id } => {
                commands::activation::info(&license_id, json_output, &config_path)?;
            }
            ActivationAction::History { license_id } => {
                commands::activation::history(&license_id, json_output, &config_path)?;
            }
            ActivationAction::Switch {
                license_id,
                cluster_id,
                reason,
            } => {
                commands::activation::switch(
                    &license_id,
                    cluster_id.as_deref(),
                    reason.as_deref(),
                    json_output,
                    &config_path,
                )?;
            }
            ActivationAction::Regenerate {
                license_id,
                cluster_id,
                reason,
            } => {
                commands::activation::regenerate(
                    &license_id,
                    &cluster_id,
                    reason.as_deref(),
                    json_output,
                    &config_path,
                )?;
            }
        },

        Commands::Timeline { license_id } => {
            commands::licenses::timeline(&license_id, json_output, &config_path)?;
        }

        Commands::Status => {
            status(&config_path)?;
        }

        Commands::Version => {
            println!("licctl v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// STATUS — check server health for the current context.
fn status(config_path: &std::path::Path) -> anyhow::Result<()> {
    let config = config::ClientConfig::load(config_path)?;
    let ctx = config
        .current()
        .ok_or_else(|| anyhow::anyhow!("No current context."))?;

    println!("Context:   {}", ctx.name);
    let server = ctx.resolve_server();
    println!(
        "Server:    {}",
        server.as_deref().unwrap_or("-")
    );

    if server.is_none() {
        println!("Status:    no server configured");
        return Ok(());
    }

    let client = commands::build_client(config_path)?;
    match client.health() {
        Ok(()) => println!("Status:    connected"),
        Err(e) => println!("Status:    disconnected ({})", e),
    }
    Ok(())
}
