use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use docupad::api::{CmdMessage, DocupadApi, MessageLevel};
use docupad::commands::DocumentUpdate;
use docupad::config::DocupadConfig;
use docupad::error::{DocupadError, Result};
use docupad::listing::DisplayDocument;
use docupad::model::{Category, Document};
use docupad::store::fs::FileStore;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use unicode_width::UnicodeWidthStr;
use uuid::Uuid;

mod args;
use args::{CategoryCommands, Cli, Commands, EditCommands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: DocupadApi<FileStore>,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { category }) => handle_list(&ctx, category),
        Some(Commands::Create {
            name,
            category,
            description,
            file,
        }) => handle_create(&mut ctx, name, category, description, file),
        Some(Commands::Show { selectors }) => handle_show(&ctx, selectors),
        Some(Commands::Update {
            selector,
            name,
            description,
            category,
            file,
        }) => handle_update(&mut ctx, selector, name, description, category, file),
        Some(Commands::Delete { selectors }) => handle_delete(&mut ctx, selectors),
        Some(Commands::Search { term }) => handle_search(&ctx, term),
        Some(Commands::Category { action }) => handle_category(&mut ctx, action),
        Some(Commands::Share { selector }) => handle_share(&mut ctx, selector),
        Some(Commands::Unshare { selector }) => handle_unshare(&mut ctx, selector),
        Some(Commands::Download {
            selector,
            shared,
            filename,
            out,
        }) => handle_download(&ctx, selector, shared, filename, out),
        Some(Commands::Export { selectors, out }) => handle_export(&ctx, selectors, out),
        Some(Commands::Edit { action }) => handle_edit(&mut ctx, action),
        Some(Commands::Editors) => handle_editors(&ctx),
        Some(Commands::Path { selectors }) => handle_paths(&ctx, selectors),
        None => handle_list(&ctx, None),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing_subscriber::filter::LevelFilter::DEBUG
    } else {
        tracing_subscriber::filter::LevelFilter::WARN
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(level)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("com", "docupad", "docupad")
            .ok_or_else(|| DocupadError::Api("Could not determine data directory".into()))?
            .data_dir()
            .to_path_buf(),
    };

    let config = DocupadConfig::load(&data_dir)?;
    let store = FileStore::new(data_dir);
    Ok(AppContext {
        api: DocupadApi::new(store, config),
    })
}

fn handle_list(ctx: &AppContext, category: Option<String>) -> Result<()> {
    let result = ctx.api.list_documents(category.as_deref())?;
    print_documents(&result.listed_documents);
    print_messages(&result.messages);
    Ok(())
}

fn handle_create(
    ctx: &mut AppContext,
    name: String,
    category: String,
    description: String,
    file: Option<PathBuf>,
) -> Result<()> {
    let content = match file {
        Some(path) => fs::read(path)?,
        None => Vec::new(),
    };
    let result = ctx.api.create_document(&category, name, description, content)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.view_documents(&selectors)?;
    let categories = ctx.api.list_categories()?.categories;
    let root_url = ctx.api.config().root_url.clone();
    print_full_documents(&result.affected_documents, &categories, &root_url);
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(
    ctx: &mut AppContext,
    selector: String,
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let category = match category {
        Some(category_name) => Some(find_category_id(ctx, &category_name)?),
        None => None,
    };
    let content = match file {
        Some(path) => Some(fs::read(path)?),
        None => None,
    };
    let update = DocumentUpdate {
        name,
        description,
        category,
        content,
    };
    let result = ctx.api.update_document(&selector, update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_documents(&selectors)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, term: String) -> Result<()> {
    let result = ctx.api.search_documents(&term)?;
    print_documents(&result.listed_documents);
    print_messages(&result.messages);
    Ok(())
}

fn handle_category(ctx: &mut AppContext, action: CategoryCommands) -> Result<()> {
    let result = match action {
        CategoryCommands::List => {
            let result = ctx.api.list_categories()?;
            print_categories(&result.categories);
            result
        }
        CategoryCommands::Add {
            name,
            description,
            parent,
        } => ctx.api.add_category(name, description, parent.as_deref())?,
        CategoryCommands::Modify {
            name,
            new_name,
            description,
            parent,
        } => ctx
            .api
            .modify_category(&name, new_name, description, parent.as_deref())?,
        CategoryCommands::Delete { name } => ctx.api.delete_category(&name)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_share(ctx: &mut AppContext, selector: String) -> Result<()> {
    let result = ctx.api.share_document(&selector)?;
    for link in &result.links {
        println!("{}", link);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_unshare(ctx: &mut AppContext, selector: String) -> Result<()> {
    let result = ctx.api.unshare_document(&selector)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_download(
    ctx: &AppContext,
    selector: Option<String>,
    shared: Option<String>,
    filename: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let result = match (selector, shared) {
        (_, Some(token)) => {
            let filename = filename.ok_or_else(|| {
                DocupadError::Api("--filename is required with --shared".into())
            })?;
            ctx.api.download_shared(&token, &filename)?
        }
        (Some(selector), None) => ctx.api.download_document(&selector)?,
        (None, None) => {
            return Err(DocupadError::Api(
                "Provide a document selector or --shared".into(),
            ))
        }
    };

    let document = result
        .affected_documents
        .first()
        .ok_or_else(|| DocupadError::Api("Nothing to download".into()))?;
    let path = out.unwrap_or_else(|| PathBuf::from(&document.metadata.name));
    fs::write(&path, &document.content)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn handle_export(ctx: &AppContext, selectors: Vec<String>, out: Option<PathBuf>) -> Result<()> {
    let out_dir = out.unwrap_or_else(|| PathBuf::from("."));
    let result = ctx.api.export_documents(&selectors, &out_dir)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, action: EditCommands) -> Result<()> {
    let result = match action {
        EditCommands::Open { selector } => {
            let result = ctx.api.open_editor(&selector)?;
            for fragment in &result.fragments {
                println!("{}", fragment);
            }
            result
        }
        EditCommands::Sync { selector } => ctx.api.sync_editor(&selector)?,
        EditCommands::Close { selector } => ctx.api.close_editor(&selector)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_editors(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.editor_capabilities()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_paths(ctx: &AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.document_paths(&selectors)?;
    for path in &result.document_paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn find_category_id(ctx: &AppContext, name: &str) -> Result<Uuid> {
    let categories = ctx.api.list_categories()?.categories;
    categories
        .into_iter()
        .find(|c| c.name == name)
        .map(|c| c.id)
        .ok_or_else(|| DocupadError::Api(format!("No category named '{}'", name)))
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

fn print_documents(documents: &[DisplayDocument]) {
    if documents.is_empty() {
        println!("No documents found.");
        return;
    }

    for dd in documents {
        let idx_str = format!("{:>3}. ", dd.index);
        let category = format!("[{}] ", dd.category_name);
        let label = if dd.meta.description.is_empty() {
            dd.meta.name.clone()
        } else {
            format!("{} - {}", dd.meta.name, dd.meta.description)
        };

        let time_ago = format_time_ago(dd.meta.date_modified);

        let fixed_width = idx_str.width() + category.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let label_display = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label_display.width());

        let shared_marker = if dd.meta.shared.is_some() { "*" } else { " " };

        println!(
            "{}{}{}{}{}{}",
            idx_str.normal(),
            category.cyan(),
            label_display,
            " ".repeat(padding),
            shared_marker,
            time_ago.dimmed()
        );
    }
}

fn print_full_documents(documents: &[Document], categories: &[Category], root_url: &str) {
    let names: HashMap<Uuid, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    for (i, document) in documents.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        let meta = &document.metadata;
        let category = names.get(&meta.category).copied().unwrap_or("?");
        println!("{} {}", meta.name.bold(), format!("[{}]", category).cyan());
        println!("--------------------------------");
        if !meta.description.is_empty() {
            println!("{}", meta.description);
        }
        println!(
            "created  {} by {}",
            meta.date_created.format("%Y-%m-%d %H:%M"),
            meta.creator.as_deref().unwrap_or("-")
        );
        println!(
            "modified {} by {}",
            meta.date_modified.format("%Y-%m-%d %H:%M"),
            meta.modifier.as_deref().unwrap_or("-")
        );
        match &meta.shared {
            Some(token) => println!(
                "shared   {}/downloadFile?shared={}&filename={}",
                root_url.trim_end_matches('/'),
                token,
                meta.name
            ),
            None => println!("shared   no"),
        }
        println!("size     {} bytes", document.content.len());
    }
}

fn print_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }

    let names: HashMap<Uuid, &str> = categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    for category in categories {
        let parent = category
            .parent
            .and_then(|p| names.get(&p).copied())
            .map(|p| format!(" (in {})", p))
            .unwrap_or_default();
        if category.description.is_empty() {
            println!("{}{}", category.name.bold(), parent.dimmed());
        } else {
            println!(
                "{}{} - {}",
                category.name.bold(),
                parent.dimmed(),
                category.description
            );
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
