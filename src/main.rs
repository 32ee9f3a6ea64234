use std::net::SocketAddr;
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use kvm_panel::api::{set_silent, KvmClient};
use kvm_panel::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use kvm_panel::controller::{
    ActionOutcome, AssumeYes, Confirm, ControllerSettings, FollowUpAnswer, StdinConfirm, ViewController,
};
use kvm_panel::document::{HtmlDocument, TerminalDocument};
use kvm_panel::models::{AppState, CatalogEntry, CreateVmForm, DownloadIsoForm, IsoImage, Page, VirtualMachine};
use kvm_panel::routes::build_app;
use kvm_panel::utils::{format_file_size, format_timestamp};

fn build_client(env_file: Option<&str>) -> KvmClient {
    config::load_env_file(env_file);
    let base_url = config::get_api_base_url();
    match KvmClient::new(&base_url) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(%e, "Failed to create HTTP client");
            eprintln!("{}: {}", yansi::Paint::new("Failed to create HTTP client").red(), e);
            process::exit(1);
        }
    }
}

fn terminal_controller(env_file: Option<&str>) -> ViewController<KvmClient, TerminalDocument> {
    let client = build_client(env_file);
    ViewController::new(Arc::new(client), TerminalDocument::new(), ControllerSettings::from_env())
}

async fn start_server(host: &str, port: u16, env_file: Option<&str>, stylesheet: Option<String>) {
    let client = build_client(env_file);
    let api_base_url = client.base_url().to_string();
    let controller = ViewController::new(Arc::new(client), HtmlDocument::new(), ControllerSettings::from_env());
    let mut state = AppState::new(controller, api_base_url);

    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                eprintln!("{} {}: {}", yansi::Paint::red("Failed to read custom stylesheet at"), path, e);
                process::exit(1);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            eprintln!("{}: {}", yansi::Paint::red("Invalid host/port format"), e);
            process::exit(1);
        }
    };

    // Initial load: dashboard shown, stats refresh running.
    state.controller.init().await;

    let app = build_app(state.clone());
    tracing::info!(%addr, api = %state.api_base_url, "Starting KVM panel");
    println!(
        "{} {}",
        yansi::Paint::new("Web panel running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                eprintln!("{}: {}", yansi::Paint::new("Server error").red(), e);
                process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn print_vms(vms: &[VirtualMachine]) {
    if vms.is_empty() {
        println!("(no virtual machines)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["Name", "Status", "Memory", "vCPUs", "UUID"]);
    for vm in vms {
        table.add_row(vec![
            vm.name.clone(),
            vm.status_text().to_string(),
            format!("{} МБ", vm.memory_mb()),
            vm.vcpus.to_string(),
            vm.uuid.clone(),
        ]);
    }
    println!("\n{table}\n");
}

fn print_vm(vm: &VirtualMachine) {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["name".to_string(), vm.name.clone()]);
    table.add_row(vec!["uuid".to_string(), vm.uuid.clone()]);
    table.add_row(vec!["status".to_string(), vm.status_text().to_string()]);
    table.add_row(vec!["state".to_string(), vm.state.clone().unwrap_or_default()]);
    table.add_row(vec!["memory".to_string(), format!("{} МБ", vm.memory_mb())]);
    table.add_row(vec!["vcpus".to_string(), vm.vcpus.to_string()]);
    if let Some(id) = vm.id {
        table.add_row(vec!["id".to_string(), id.to_string()]);
    }
    println!("\n{table}\n");
}

fn print_isos(isos: &[IsoImage]) {
    if isos.is_empty() {
        println!("(no ISO images)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["Name", "Size", "Modified", "Path"]);
    for iso in isos {
        table.add_row(vec![
            iso.name.clone(),
            format_file_size(iso.size),
            format_timestamp(&iso.modified),
            iso.path.clone(),
        ]);
    }
    println!("\n{table}\n");
}

fn print_catalog(entries: &[CatalogEntry], downloaded: &[IsoImage]) {
    if entries.is_empty() {
        println!("(catalog unavailable)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["Name", "Description", "Size", "Downloaded", "Filename"]);
    for entry in entries {
        let mark = if entry.is_downloaded_in(downloaded) { "yes" } else { "" };
        table.add_row(vec![
            entry.name.clone(),
            entry.description.clone(),
            format_file_size(entry.size),
            mark.to_string(),
            entry.filename.clone(),
        ]);
    }
    println!("\n{table}\n");
}

/// Map an action outcome to the process exit status. The notification has
/// already been printed by the document.
fn finish(outcome: ActionOutcome) {
    match outcome {
        ActionOutcome::Done => {}
        ActionOutcome::Cancelled => println!("{}", yansi::Paint::new("Cancelled").yellow()),
        ActionOutcome::Rejected | ActionOutcome::Failed(_) => process::exit(1),
    }
}

#[derive(Parser)]
#[command(
    name = "kvmp",
    author,
    version,
    about = "KVM management panel",
    long_about = r#"kvmp: a web panel and command line for a KVM/libvirt management API.

The panel shows host resource usage, lists and controls virtual machines,
creates new ones and manages installation ISO images. Every command talks to
the REST API configured by KVM_API_URL (default http://localhost:8001/api).

Examples:
  1) Run the web panel:
      kvmp serve --host 127.0.0.1 --port 8080
  2) Manage virtual machines:
      kvmp vms list
      kvmp vms stop web01 --force
  3) Download an installation image:
      kvmp iso download https://example.org/ubuntu.iso
"#,
    after_help = "Use `kvmp <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
    /// Answer yes to every confirmation
    #[arg(long, short = 'y', global = true)]
    yes: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web panel
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Validate configuration and check that the API answers
    #[command(long_about = "Print the effective configuration and call the API root to confirm the backend is reachable.")]
    CheckConfig,
    /// Show host CPU, memory and disk usage
    Stats,
    /// Print host stats on every refresh interval until interrupted
    Watch,
    /// Manage virtual machines
    Vms {
        #[command(subcommand)]
        sub: VmCommands,
    },
    /// Manage ISO images and the OS catalog
    Iso {
        #[command(subcommand)]
        sub: IsoCommands,
    },
}

#[derive(Subcommand)]
enum VmCommands {
    /// List virtual machines
    List,
    /// Show one virtual machine
    Show { name: String },
    /// Start a virtual machine
    Start { name: String },
    /// Stop a virtual machine
    Stop {
        name: String,
        /// Power off immediately instead of a guest shutdown
        #[arg(long)]
        force: bool,
    },
    /// Restart a virtual machine
    Restart { name: String },
    /// Delete a virtual machine
    #[command(long_about = "Delete a virtual machine. Asks for confirmation, then whether its disks should be removed too; --delete-disks answers the second question up front.")]
    Delete {
        name: String,
        /// Also delete the VM disks
        #[arg(long)]
        delete_disks: bool,
    },
    /// Create a virtual machine
    Create {
        name: String,
        /// Memory in MB
        #[arg(long, default_value = "2048")]
        memory: String,
        #[arg(long, default_value = "2")]
        vcpus: String,
        /// Disk size in GB
        #[arg(long, default_value = "20")]
        disk_size: String,
        /// Installation ISO path
        #[arg(long, default_value = "")]
        iso_path: String,
        #[arg(long, default_value = "default")]
        network: String,
    },
    /// Print the console URL of a virtual machine
    Console { name: String },
}

#[derive(Subcommand)]
enum IsoCommands {
    /// List downloaded ISO images
    List,
    /// Show the OS catalog
    Catalog,
    /// Rescan the ISO directory
    Scan,
    /// Start downloading an ISO image
    Download {
        url: String,
        #[arg(long, default_value = "")]
        filename: String,
    },
    /// Download an image listed in the OS catalog
    Fetch {
        /// Catalog entry name or filename
        entry: String,
    },
    /// Delete an ISO image
    Delete { iso_path: String },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }
    if cli.silent {
        set_silent(true);
    }

    let confirm: Box<dyn Confirm> = if cli.yes { Box::new(AssumeYes) } else { Box::new(StdinConfirm) };
    let env_file = cli.env_file.as_deref();

    // No command: serve the panel with defaults
    let Some(command) = cli.command else {
        start_server(DEFAULT_HOST, DEFAULT_PORT, env_file, None).await;
        return;
    };

    match command {
        Commands::Serve { host, port, stylesheet } => {
            config::load_env_file(env_file);
            let host = host.unwrap_or_else(config::get_host);
            let port = port.unwrap_or_else(config::get_port);
            start_server(&host, port, env_file, stylesheet).await;
        }
        Commands::CheckConfig => {
            let client = build_client(env_file);
            let settings = ControllerSettings::from_env();
            println!("{} {}", yansi::Paint::new("API URL:").bold(), client.base_url());
            println!(
                "{} {}s",
                yansi::Paint::new("Stats refresh:").bold(),
                settings.poll_interval.as_secs()
            );
            match client.api_info().await {
                Ok(info) => {
                    let mode = if info.demo_mode { " (demo mode)" } else { "" };
                    println!(
                        "{} {} {}{}",
                        yansi::Paint::new("API reachable:").green(),
                        info.name,
                        info.version,
                        mode
                    );
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("API is not reachable").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Stats => {
            let client = build_client(env_file);
            match client.host_stats().await {
                Ok(stats) => {
                    let mut table = new_table();
                    table.set_header(vec!["Resource", "Usage"]);
                    table.add_row(vec!["CPU".to_string(), stats.cpu_display()]);
                    table.add_row(vec!["Memory".to_string(), stats.memory_display()]);
                    table.add_row(vec!["Disk".to_string(), stats.disk_display()]);
                    if let Some(ts) = &stats.timestamp {
                        table.add_row(vec!["Timestamp".to_string(), format_timestamp(ts)]);
                    }
                    println!("\n{table}\n");
                }
                Err(e) => {
                    eprintln!("{}: {}", yansi::Paint::new("Failed to fetch host stats").red(), e);
                    process::exit(1);
                }
            }
        }
        Commands::Watch => {
            let controller = terminal_controller(env_file);
            controller.init().await;
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(%e, "Failed to listen for ctrl-c");
            }
            controller.stop_stats_update();
        }
        Commands::Vms { sub } => {
            let controller = terminal_controller(env_file);
            // Actions refresh the current page; make that the VM list.
            controller.show_page(Page::Vms.to_str()).await;
            match sub {
                VmCommands::List => print_vms(&controller.vms()),
                VmCommands::Show { name } => match controller.backend().get_vm(&name).await {
                    Ok(vm) => print_vm(&vm),
                    Err(e) => {
                        eprintln!("{}", yansi::Paint::new(e.user_message("Ошибка загрузки ВМ")).red());
                        process::exit(1);
                    }
                },
                VmCommands::Start { name } => finish(controller.start_vm(&name).await),
                VmCommands::Stop { name, force } => {
                    let outcome = if force {
                        controller.force_stop_vm(&name, confirm.as_ref()).await
                    } else {
                        controller.stop_vm(&name, confirm.as_ref()).await
                    };
                    finish(outcome);
                }
                VmCommands::Restart { name } => finish(controller.restart_vm(&name, confirm.as_ref()).await),
                VmCommands::Delete { name, delete_disks } => {
                    // With --yes or --delete-disks the flag alone answers the disk question.
                    let outcome = if cli.yes || delete_disks {
                        controller.delete_vm(&name, &FollowUpAnswer::new(confirm.as_ref(), delete_disks)).await
                    } else {
                        controller.delete_vm(&name, confirm.as_ref()).await
                    };
                    finish(outcome);
                }
                VmCommands::Create { name, memory, vcpus, disk_size, iso_path, network } => {
                    let form = CreateVmForm { name, memory, vcpus, disk_size, iso_path, network };
                    let outcome = controller.create_vm(&form).await;
                    if outcome.is_done() {
                        print_vms(&controller.vms());
                    }
                    finish(outcome);
                }
                VmCommands::Console { name } => controller.open_console(&name),
            }
        }
        Commands::Iso { sub } => {
            let controller = terminal_controller(env_file);
            controller.show_page(Page::Images.to_str()).await;
            match sub {
                IsoCommands::List => print_isos(&controller.downloaded_isos()),
                IsoCommands::Catalog => print_catalog(&controller.os_catalog(), &controller.downloaded_isos()),
                IsoCommands::Scan => {
                    let outcome = controller.scan_isos().await;
                    if outcome.is_done() {
                        print_isos(&controller.downloaded_isos());
                    }
                    finish(outcome);
                }
                IsoCommands::Download { url, filename } => {
                    finish(controller.download_iso(&DownloadIsoForm { url, filename }).await)
                }
                IsoCommands::Fetch { entry } => {
                    let found = controller
                        .os_catalog()
                        .into_iter()
                        .find(|e| e.name.eq_ignore_ascii_case(&entry) || e.filename == entry);
                    match found {
                        Some(e) => finish(controller.download_os_from_catalog(&e.url, &e.filename).await),
                        None => {
                            eprintln!("{} '{}'", yansi::Paint::new("No catalog entry named").red(), entry);
                            process::exit(1);
                        }
                    }
                }
                IsoCommands::Delete { iso_path } => finish(controller.delete_iso(&iso_path, confirm.as_ref()).await),
            }
        }
    }
}
