use chrono::Utc;

use crate::analytics;
use crate::app::{AppContext, Result};
use crate::domain::Article;
use crate::feed::{FeedController, PageEntry};

pub async fn headlines(
    ctx: &AppContext,
    category: &str,
    country: Option<&str>,
    page: usize,
) -> Result<()> {
    let mut controller = ctx.controller();
    controller.set_category(category);
    if let Some(country) = country {
        controller.set_country(country);
        ctx.prefs.set_country(country);
    }
    controller.sync().await;
    controller.set_page(page);

    print_page(&controller);
    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str, page: usize) -> Result<()> {
    let mut controller = ctx.controller();
    controller.set_search_query(query);
    controller.sync().await;
    controller.set_page(page);

    print_page(&controller);
    Ok(())
}

pub fn bookmarks(ctx: &AppContext) -> Result<()> {
    let store = ctx.bookmarks();

    if store.is_empty() {
        println!("No bookmarks");
        return Ok(());
    }

    for article in store.all() {
        print_article(article);
    }
    Ok(())
}

pub async fn analytics(ctx: &AppContext, category: &str) -> Result<()> {
    let mut controller = ctx.controller();
    controller.set_category(category);
    controller.sync().await;

    let articles = controller.articles();
    if articles.is_empty() {
        println!("No articles available to generate analytics");
        return Ok(());
    }

    println!("Analyzing {} articles\n", articles.len());

    println!("Sources:");
    for entry in analytics::source_distribution(articles) {
        println!("  {:<24} {:>3}  {}", entry.label, entry.count, bar(entry.count));
    }

    println!("\nTop keywords:");
    for entry in analytics::word_frequencies(articles).into_iter().take(30) {
        println!("  {:<24} {:>3}", entry.label, entry.count);
    }

    println!("\nCategories:");
    for entry in analytics::category_distribution(articles) {
        println!("  {:<24} {:>3}", entry.label, entry.count);
    }

    println!("\nLast 7 days:");
    for day in analytics::daily_counts(articles, Utc::now().date_naive()) {
        println!("  {}  {:>3}  {}", day.date, day.count, bar(day.count));
    }

    Ok(())
}

fn bar(count: usize) -> String {
    "#".repeat(count.min(40))
}

fn print_page(controller: &FeedController) {
    let articles = controller.current_page();

    if articles.is_empty() {
        println!("No articles found");
        return;
    }

    for article in &articles {
        print_article(article);
    }

    let total = controller.total_pages();
    if total > 1 {
        println!();
        println!(
            "{}   ({} pages)",
            format_page_window(&controller.page_window(), controller.page()),
            total
        );
    }
}

fn print_article(article: &Article) {
    let date = article
        .published_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "          ".to_string());

    println!("{} [{}] {}", date, article.source_name(), article.title);
    if let Some(body) = article.text_body() {
        println!("    {}", body);
    }
    println!("    {}", article.url);
}

fn format_page_window(entries: &[PageEntry], current: usize) -> String {
    entries
        .iter()
        .map(|entry| match entry {
            PageEntry::Page(p) if *p == current => format!("[{}]", p),
            PageEntry::Page(p) => p.to_string(),
            PageEntry::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
