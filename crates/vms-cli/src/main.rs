//! `vms`: admin client for the VMS site.
//!
//! Signs in against the server's login gate and edits the hero banner over
//! the HTTP API. Every editing command runs one editor session: fetch the
//! document, apply the change locally, save it back. Open public pages pick
//! the save up from the server's change stream.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod client;
mod session;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use vms_core::editor::{
    ButtonSlot, CardField, EditorSession, UploadTarget, UploadedImage,
};
use vms_core::error::EditorError;
use vms_core::hero::{Card, CardKind, HeroConfig, Slide};

use crate::client::Client;

// ── ANSI color helpers ───────────────────────────────────────────────

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ── CLI structure ────────────────────────────────────────────────────

/// VMS admin CLI.
#[derive(Parser)]
#[command(
    name = "vms",
    version,
    about = "VMS admin CLI: sign in and edit the hero banner of the VMS site",
    long_about = None,
    after_help = format!(
        "{DIM}Environment variables:{RESET}\n  \
         VMS_ADDR      Server address (default: http://127.0.0.1:3000)\n\n\
         {DIM}Examples:{RESET}\n  \
         vms login --email admin@vms.com --password admin123\n  \
         vms hero show\n  \
         vms hero set --title \"Marine supplies, port to port\"\n  \
         vms hero upload deck.jpg hull.png\n  \
         vms hero slides move 2 up"
    ),
)]
struct Cli {
    /// VMS server address.
    #[arg(long, env = "VMS_ADDR", default_value = "http://127.0.0.1:3000")]
    addr: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show server health and the signed-in account.
    Status,
    /// Sign in and remember the account in ~/.vms/session.json.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "VMS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the signed-in account.
    Logout,
    /// Inspect and edit the hero banner.
    Hero {
        #[command(subcommand)]
        action: HeroCommands,
    },
}

#[derive(Subcommand)]
enum HeroCommands {
    /// Print the current hero document.
    Show {
        /// Print raw JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },
    /// Change the title and/or subtitle.
    Set {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
    },
    /// Change a call-to-action button.
    Buttons {
        slot: SlotArg,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        href: Option<String>,
    },
    /// Edit background slides.
    Slides {
        #[command(subcommand)]
        action: SlideCommands,
    },
    /// Edit product or technical-service cards.
    Cards {
        kind: KindArg,
        #[command(subcommand)]
        action: CardCommands,
    },
    /// Upload images and append them as slides (or to one card).
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Append to this card collection instead of the slides.
        #[arg(long, requires = "card")]
        kind: Option<KindArg>,
        /// Position of the card within `--kind`.
        #[arg(long, requires = "kind")]
        card: Option<usize>,
    },
}

#[derive(Subcommand)]
enum SlideCommands {
    /// Append a slide for an already-hosted image.
    Add {
        src: String,
        #[arg(long)]
        alt: Option<String>,
    },
    /// Remove the slide at a position.
    Remove { index: usize },
    /// Swap a slide with its neighbour.
    Move { index: usize, direction: Direction },
    /// Set alt text; an empty string clears it.
    Alt { index: usize, alt: String },
}

#[derive(Subcommand)]
enum CardCommands {
    /// Append a card.
    Add {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        alt: Option<String>,
    },
    /// Remove the card at a position.
    Remove { index: usize },
    /// Swap a card with its neighbour.
    Move { index: usize, direction: Direction },
    /// Set one text field of a card.
    Set {
        index: usize,
        field: FieldArg,
        value: String,
    },
    /// Append already-hosted image URLs to a card.
    AddImages {
        index: usize,
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Remove one image from a card.
    RemoveImage { index: usize, image: usize },
}

#[derive(Clone, Copy, ValueEnum)]
enum SlotArg {
    First,
    Second,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Products,
    Services,
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Up,
    Down,
}

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    Title,
    Desc,
    Alt,
}

impl From<SlotArg> for ButtonSlot {
    fn from(slot: SlotArg) -> Self {
        match slot {
            SlotArg::First => Self::First,
            SlotArg::Second => Self::Second,
        }
    }
}

impl From<KindArg> for CardKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Products => Self::Products,
            KindArg::Services => Self::TechnicalServices,
        }
    }
}

impl From<FieldArg> for CardField {
    fn from(field: FieldArg) -> Self {
        match field {
            FieldArg::Title => Self::Title,
            FieldArg::Desc => Self::Desc,
            FieldArg::Alt => Self::Alt,
        }
    }
}

impl Direction {
    fn delta(self) -> isize {
        match self {
            Self::Up => -1,
            Self::Down => 1,
        }
    }
}

// ── Pretty output helpers ────────────────────────────────────────────

fn header(title: &str) {
    println!("{BOLD}{CYAN}⚓ {title}{RESET}");
    println!("{DIM}─────────────────────────────────────────{RESET}");
}

fn kv_line(key: &str, value: &str) {
    println!("  {DIM}{key:<14}{RESET} {WHITE}{value}{RESET}");
}

fn success(msg: &str) {
    println!("{GREEN}{BOLD}✓{RESET} {msg}");
}

fn warning(msg: &str) {
    println!("{YELLOW}{BOLD}⚠{RESET} {YELLOW}{msg}{RESET}");
}

fn print_hero(cfg: &HeroConfig) {
    header("Hero banner");
    kv_line("Title", &cfg.title);
    kv_line("Subtitle", &cfg.subtitle);
    kv_line(
        "Button 1",
        &format!("{} → {}", cfg.button1.text, cfg.button1.href),
    );
    kv_line(
        "Button 2",
        &format!("{} → {}", cfg.button2.text, cfg.button2.href),
    );

    println!();
    println!("  {BOLD}Slides{RESET} {DIM}({}){RESET}", cfg.slides.len());
    for (i, slide) in cfg.slides.iter().enumerate() {
        print_slide(i, slide);
    }

    for kind in [CardKind::Products, CardKind::TechnicalServices] {
        let cards = cfg.cards(kind);
        println!();
        println!("  {BOLD}{}{RESET} {DIM}({}){RESET}", kind.label(), cards.len());
        for (i, card) in cards.iter().enumerate() {
            print_card(i, card);
        }
    }
}

fn print_slide(i: usize, slide: &Slide) {
    match &slide.alt {
        Some(alt) => println!("  {DIM}[{i}]{RESET} {} {DIM}({alt}){RESET}", slide.src),
        None => println!("  {DIM}[{i}]{RESET} {}", slide.src),
    }
}

fn print_card(i: usize, card: &Card) {
    let title = if card.title.is_empty() {
        "(untitled)"
    } else {
        &card.title
    };
    println!(
        "  {DIM}[{i}]{RESET} {title} {DIM}· {} image(s){RESET}",
        card.images.len()
    );
    for (j, src) in card.images.iter().enumerate() {
        println!("       {DIM}{j}:{RESET} {src}");
    }
}

// ── Editor session ───────────────────────────────────────────────────

/// Load the document into a fresh session, or fail without saving.
async fn open_session(client: &Client) -> Result<EditorSession> {
    let mut editor = EditorSession::new();
    match client.hero().await {
        Ok(cfg) => editor.loaded(cfg),
        Err(e) => {
            editor.load_failed(e.to_string());
            bail!("failed to load the hero banner: {e:#}");
        }
    }
    Ok(editor)
}

/// Save the session's document if it has unsaved changes.
async fn save_session(client: &Client, editor: &mut EditorSession, done: &str) -> Result<()> {
    if !editor.is_dirty() {
        warning("Nothing changed; not saving.");
        return Ok(());
    }

    let snapshot = editor.begin_save()?;
    match client.save_hero(&snapshot).await {
        Ok(()) => {
            editor.save_succeeded()?;
            success(done);
            Ok(())
        }
        Err(e) => {
            editor.save_failed(e.to_string());
            bail!("save failed: {e:#}");
        }
    }
}

/// One complete edit: guard, load, mutate, save.
async fn edit_hero(
    client: &Client,
    done: &str,
    mutate: impl FnOnce(&mut EditorSession) -> Result<bool, EditorError>,
) -> Result<()> {
    session::require_admin(&session::session_path()?)?;
    let mut editor = open_session(client).await?;
    mutate(&mut editor)?;
    save_session(client, &mut editor, done).await
}

// ── Commands ─────────────────────────────────────────────────────────

async fn cmd_status(client: &Client) -> Result<()> {
    header("VMS status");
    kv_line("Server", client.addr());
    match client.health().await {
        Ok(_) => kv_line("Health", &format!("{GREEN}ok{RESET}")),
        Err(e) => kv_line("Health", &format!("{RED}unreachable{RESET} {DIM}({e:#}){RESET}")),
    }
    match session::load(&session::session_path()?)? {
        Some(s) => kv_line("Signed in", &format!("{} ({})", s.email, s.role)),
        None => kv_line("Signed in", "no"),
    }
    Ok(())
}

async fn cmd_login(client: &Client, email: &str, password: &str) -> Result<()> {
    let session = client.login(email, password).await?;
    let path = session::session_path()?;
    session::save(&path, &session)?;

    success(&format!("Signed in as {} ({})", session.email, session.role));
    if !session.is_admin() {
        warning("This account cannot edit the hero banner.");
    }
    Ok(())
}

fn cmd_logout() -> Result<()> {
    if session::remove(&session::session_path()?)? {
        success("Signed out.");
    } else {
        warning("Not signed in.");
    }
    Ok(())
}

async fn cmd_hero(client: &Client, action: HeroCommands) -> Result<()> {
    match action {
        HeroCommands::Show { json } => {
            let cfg = client.hero().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else {
                print_hero(&cfg);
            }
            Ok(())
        }
        HeroCommands::Set { title, subtitle } => {
            if title.is_none() && subtitle.is_none() {
                bail!("nothing to set; pass --title and/or --subtitle");
            }
            edit_hero(client, "Hero text updated.", |s| {
                if let Some(title) = title {
                    s.set_title(title)?;
                }
                if let Some(subtitle) = subtitle {
                    s.set_subtitle(subtitle)?;
                }
                Ok(true)
            })
            .await
        }
        HeroCommands::Buttons { slot, text, href } => {
            edit_hero(client, "Button updated.", |s| {
                s.set_button(slot.into(), text, href)?;
                Ok(true)
            })
            .await
        }
        HeroCommands::Slides { action } => cmd_slides(client, action).await,
        HeroCommands::Cards { kind, action } => cmd_cards(client, kind.into(), action).await,
        HeroCommands::Upload { files, kind, card } => {
            let target = match (kind, card) {
                (Some(kind), Some(index)) => UploadTarget::Card {
                    kind: kind.into(),
                    index,
                },
                _ => UploadTarget::Slides,
            };
            cmd_upload(client, &files, target).await
        }
    }
}

async fn cmd_slides(client: &Client, action: SlideCommands) -> Result<()> {
    match action {
        SlideCommands::Add { src, alt } => {
            edit_hero(client, "Slide added.", |s| {
                let slide = match alt {
                    Some(alt) => Slide::with_alt(src, alt),
                    None => Slide::new(src),
                };
                s.add_slide(slide)?;
                Ok(true)
            })
            .await
        }
        SlideCommands::Remove { index } => {
            edit_hero(client, "Slide removed.", |s| s.remove_slide(index)).await
        }
        SlideCommands::Move { index, direction } => {
            edit_hero(client, "Slide moved.", |s| {
                s.move_slide(index, direction.delta())
            })
            .await
        }
        SlideCommands::Alt { index, alt } => {
            edit_hero(client, "Alt text updated.", |s| s.set_slide_alt(index, &alt)).await
        }
    }
}

async fn cmd_cards(client: &Client, kind: CardKind, action: CardCommands) -> Result<()> {
    match action {
        CardCommands::Add { title, desc, alt } => {
            edit_hero(client, "Card added.", |s| {
                s.add_card(kind)?;
                let index = s.config().cards(kind).len().saturating_sub(1);
                for (field, value) in [
                    (CardField::Title, title),
                    (CardField::Desc, desc),
                    (CardField::Alt, alt),
                ] {
                    if let Some(value) = value {
                        s.update_card(kind, index, field, &value)?;
                    }
                }
                Ok(true)
            })
            .await
        }
        CardCommands::Remove { index } => {
            edit_hero(client, "Card removed.", |s| s.remove_card(kind, index)).await
        }
        CardCommands::Move { index, direction } => {
            edit_hero(client, "Card moved.", |s| {
                s.move_card(kind, index, direction.delta())
            })
            .await
        }
        CardCommands::Set {
            index,
            field,
            value,
        } => {
            edit_hero(client, "Card updated.", |s| {
                s.update_card(kind, index, field.into(), &value)
            })
            .await
        }
        CardCommands::AddImages { index, urls } => {
            edit_hero(client, "Images added.", |s| {
                s.append_card_images(kind, index, urls)
            })
            .await
        }
        CardCommands::RemoveImage { index, image } => {
            edit_hero(client, "Image removed.", |s| {
                s.remove_card_image(kind, index, image)
            })
            .await
        }
    }
}

async fn cmd_upload(client: &Client, files: &[PathBuf], target: UploadTarget) -> Result<()> {
    session::require_admin(&session::session_path()?)?;
    let mut editor = open_session(client).await?;

    editor.begin_upload()?;
    let mut images = Vec::with_capacity(files.len());
    for path in files {
        match client.upload(path).await {
            Ok(src) => {
                println!("  {DIM}uploaded{RESET} {} → {src}", path.display());
                images.push(UploadedImage {
                    src,
                    original_name: file_name(path),
                });
            }
            Err(e) => {
                editor.upload_failed(e.to_string());
                bail!("upload of {} failed: {e:#}", path.display());
            }
        }
    }
    editor.uploads_finished(target, images)?;

    save_session(client, &mut editor, "Uploaded images saved to the hero banner.").await
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ── Command dispatch ─────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let client = Client::new(&cli.addr);

    match run(&client, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("  {RED}{BOLD}✗ Error:{RESET} {e:#}");
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &Client, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Status => cmd_status(client).await,
        Commands::Login { email, password } => cmd_login(client, &email, &password).await,
        Commands::Logout => cmd_logout(),
        Commands::Hero { action } => cmd_hero(client, action).await,
    }
}
