//! Recommendation log commands (history, stats)

use anyhow::Result;
use furrow_core::Database;

use super::truncate;

pub fn cmd_history(db: &Database, limit: i64, crop: Option<&str>, json: bool) -> Result<()> {
    let records = match crop {
        Some(c) => db.list_recommendations_for_crop(c, limit)?,
        None => db.list_recommendations(limit)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No recommendations recorded yet. Try:");
        println!("  furrow recommend -l 2.5 -s loamy -p grains");
        return Ok(());
    }

    println!();
    println!("📜 Recommendation History");
    println!(
        "   {:>5} {:>4}  {:<12} {:>6} {:>6}  {:<19}  {}",
        "REQ", "RANK", "CROP", "SCORE", "SUST.", "WHEN", "RATIONALE"
    );
    println!("   {}", "─".repeat(100));

    for r in records {
        println!(
            "   {:>5} {:>4}  {:<12} {:>6.2} {:>6.2}  {:<19}  {}",
            r.request_id,
            r.rank,
            truncate(&r.crop, 12),
            r.score,
            r.sustainability_score,
            r.created_at.format("%Y-%m-%d %H:%M:%S"),
            truncate(&r.rationale, 60)
        );
    }
    println!();

    Ok(())
}

pub fn cmd_stats(db: &Database) -> Result<()> {
    let stats = db.recommendation_stats()?;
    let requests = db.count_requests()?;

    println!();
    println!("📊 Recommendation Stats");
    println!("   ─────────────────────────────");
    println!("   Requests: {}", requests);
    println!("   Rows:     {}", db.count_recommendations()?);
    println!();

    if stats.is_empty() {
        println!("   Nothing recorded yet.");
        println!();
        return Ok(());
    }

    println!(
        "   {:<12} {:>11} {:>9} {:>9}",
        "CROP", "RECOMMENDED", "TOP PICK", "AVG SCORE"
    );
    for s in stats {
        println!(
            "   {:<12} {:>11} {:>9} {:>9.2}",
            truncate(&s.crop, 12),
            s.times_recommended,
            s.times_top,
            s.avg_score
        );
    }
    println!();

    Ok(())
}
