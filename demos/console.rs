//! Console host for the category form
//!
//! Stands in for the desktop toolkit: each input line is one user gesture.
//!
//! ```text
//! list                      show the (filtered) table
//! search <text>             live filter; `search` alone clears it
//! select <row>              select a visible row (0-based)
//! set <field> <value>       brand | type | size | unit | weight
//! save | update | delete | edit | clear | reload
//! quit
//! ```
//!
//! Set `CATEGORY_DESK_CONFIG` to a YAML file to pick the storage backend.

use category_desk::prelude::*;
use category_desk::form::HEADERS;
use category_desk::telemetry::init_tracing;
use std::io::{BufRead, Write};

fn print_table(form: &FormController<RecordingNotifier>) {
    println!("{}", HEADERS.join(" | "));
    let selected = form.table().selected().and_then(|c| c.id);
    for (index, record) in form.table().visible().into_iter().enumerate() {
        let marker = if record.id.is_some() && record.id == selected { '>' } else { ' ' };
        println!("{} {:>2}  {}", marker, index, record.render_row().join(" | "));
    }
}

fn print_form(form: &FormController<RecordingNotifier>) {
    let fields = form.fields();
    let show = |field: ComboField| fields.choice(field).unwrap_or("-").to_string();
    println!(
        "[{:?}] id={} brand={} type={} size={} weight={} unit={}",
        form.state(),
        fields.category_id(),
        show(ComboField::Brand),
        show(ComboField::Type),
        show(ComboField::Size),
        if fields.weight_text().is_empty() { "-" } else { fields.weight_text() },
        show(ComboField::Unit),
    );
}

fn parse_action(line: &str) -> Option<FormAction> {
    let mut parts = line.trim().splitn(3, ' ');
    let command = parts.next()?;
    let arg = parts.next();
    let rest = parts.next();

    match (command, arg) {
        ("search", query) => {
            let query = [query, rest].into_iter().flatten().collect::<Vec<_>>().join(" ");
            Some(FormAction::Search(query))
        }
        ("select", Some(row)) => row.parse().ok().map(|i| FormAction::Select(Some(i))),
        ("select", None) => Some(FormAction::Select(None)),
        ("set", Some("weight")) => Some(FormAction::SetWeight(rest.unwrap_or("").to_string())),
        ("set", Some(field)) => ComboField::from_label(field)
            .map(|f| FormAction::Choose(f, rest.map(str::to_string))),
        ("save", _) => Some(FormAction::Save),
        ("update", _) => Some(FormAction::Update),
        ("delete", _) => Some(FormAction::Delete),
        ("edit", _) => Some(FormAction::Edit),
        ("clear", _) => Some(FormAction::Clear),
        ("reload", _) => Some(FormAction::Reload),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let notifier = RecordingNotifier::new();
    let mut form = FormController::open(notifier.clone()).await?;

    println!("Category desk. Options: brands={:?}", form.options().brands);
    print_form(&form);

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "list" => {
                print_table(&form);
                continue;
            }
            _ => {}
        }

        let Some(action) = parse_action(&line) else {
            println!("unknown command: {}", line.trim());
            continue;
        };

        form.dispatch(action).await;
        for alert in notifier.drain() {
            println!("! {}", alert);
        }
        print_form(&form);
    }

    Ok(())
}
