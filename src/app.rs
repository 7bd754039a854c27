use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::{
    cli::{Cli, Command},
    domain, infra,
    infra::{catalog::DemoCatalog, logging::LogSink},
    ui,
    usecases::{
        self, bootstrap,
        list_conversations::{ConversationListing, ListConversationsQuery},
    },
};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run => {
            let context = bootstrap::bootstrap(cli.config.as_deref(), cli.role, LogSink::File)?;
            log_module_boundaries();

            let session = bootstrap::start_session(&context, &DemoCatalog)
                .context("failed to seed the demo inbox")?;
            let mut shell = bootstrap::compose_shell(&context, session);
            ui::shell::start(
                &context,
                shell.event_source.as_mut(),
                shell.orchestrator.as_mut(),
            )?;
        }
        Command::List { search } => {
            let context = bootstrap::bootstrap(cli.config.as_deref(), cli.role, LogSink::Stderr)?;
            log_module_boundaries();

            let session = bootstrap::start_session(&context, &DemoCatalog)
                .context("failed to seed the demo inbox")?;
            let query = ListConversationsQuery::new(search.unwrap_or_default());
            let listing = session.list(&query);

            let mut stdout = io::stdout().lock();
            for line in listing_lines(&listing, session.now()) {
                writeln!(stdout, "{line}")?;
            }
        }
    }

    Ok(())
}

fn log_module_boundaries() {
    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );
}

/// One line per conversation followed by the totals line.
fn listing_lines(listing: &ConversationListing, now: DateTime<Utc>) -> Vec<String> {
    let mut lines = Vec::with_capacity(listing.rows.len() + 1);

    if listing.rows.is_empty() && listing.total_conversations > 0 {
        lines.push("No chats found".to_owned());
    }

    for row in &listing.rows {
        let mut line = format!(
            "{} [{}] {} ({})",
            row.conversation_id, row.participant_role, row.participant_name, row.product_label
        );

        if let Some(age) = row.relative_age(now) {
            line.push_str(&format!(" {age}"));
        }
        if row.unread_count > 0 {
            line.push_str(&format!(" unread={}", row.unread_count));
        }
        if let Some(status) = row.outgoing_status {
            line.push_str(&format!(" last={}", status.as_label()));
        }
        if let Some(preview) = row.last_message_preview.as_deref() {
            line.push_str(&format!(": {preview}"));
        }

        lines.push(line);
    }

    lines.push(format!(
        "{} conversations, {} unread",
        listing.total_conversations, listing.total_unread
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::conversation_store::ConversationStore,
        infra::demo_data::demo_inbox,
        test_support::{at_ms, buyer},
        usecases::list_conversations::list_conversations,
    };

    const NOW: i64 = 1_771_063_200_000;

    fn buyer_listing(search: &str) -> ConversationListing {
        let inbox = demo_inbox(&buyer(), &DemoCatalog, at_ms(NOW)).expect("seed builds");
        list_conversations(
            &ConversationStore::new(inbox),
            &ListConversationsQuery::new(search),
        )
    }

    #[test]
    fn lists_each_conversation_then_totals() {
        let lines = listing_lines(&buyer_listing(""), at_ms(NOW));

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("1 [seller] Ravi Kumar (Fresh Green Mussels) 2h ago unread=2"));
        assert_eq!(lines[3], "3 conversations, 3 unread");
    }

    #[test]
    fn search_without_matches_says_so() {
        let lines = listing_lines(&buyer_listing("oysters"), at_ms(NOW));

        assert_eq!(
            lines,
            vec![
                "No chats found".to_owned(),
                "3 conversations, 3 unread".to_owned()
            ]
        );
    }

    #[test]
    fn read_conversation_has_no_unread_marker() {
        let lines = listing_lines(&buyer_listing("priya"), at_ms(NOW));

        assert!(!lines[0].contains("unread="));
        assert!(lines[0].contains("1d ago"));
    }
}
