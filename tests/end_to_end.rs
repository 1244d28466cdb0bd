/// End-to-end scan cycles over a temporary posts directory
use anyhow::Result;
use chrono::{DateTime, Local};
use post_stamp::clock::FixedClock;
use post_stamp::front_matter::FrontMatterFormat;
use post_stamp::scanner::DocumentWalker;
use post_stamp::stamper::DateUpdater;
use post_stamp::tracker::Tracker;
use std::fs;
use tempfile::TempDir;

fn fixed_updater() -> Result<DateUpdater<FixedClock>> {
    let now = DateTime::parse_from_rfc3339("2024-06-15T08:09:10+09:00")?;
    Ok(DateUpdater::with_clock(
        FrontMatterFormat::new("---", "date")?,
        FixedClock(now),
    ))
}

#[test]
fn test_future_dated_post_gets_date() -> Result<()> {
    let posts = TempDir::new()?;
    let path = posts.path().join("2099-01-01-future.md");
    fs::write(&path, "---\ntitle: X\n---\nbody")?;

    let mut tracker = Tracker::new(DocumentWalker::new(posts.path()));
    tracker.initialize()?;

    fs::write(&path, "---\ntitle: X\n---\nbody, edited")?;
    let report = tracker.scan_cycle(&fixed_updater()?);

    assert_eq!(report.updated, 1);
    assert_eq!(
        fs::read_to_string(&path)?,
        "---\ntitle: X\ndate: 2024-06-15 08:09:10 +0900\n---\nbody, edited"
    );
    Ok(())
}

#[test]
fn test_old_post_header_untouched() -> Result<()> {
    let posts = TempDir::new()?;
    let path = posts.path().join("2000-01-01-old.md");
    fs::write(&path, "---\ntitle: Old\n---\nbody")?;

    let mut tracker = Tracker::new(DocumentWalker::new(posts.path()));
    tracker.initialize()?;

    fs::write(&path, "---\ntitle: Old\n---\nbody, edited")?;
    let report = tracker.scan_cycle(&fixed_updater()?);

    assert_eq!(report.skipped, 1);
    assert_eq!(fs::read_to_string(&path)?, "---\ntitle: Old\n---\nbody, edited");
    Ok(())
}

#[test]
fn test_existing_date_replaced_in_place() -> Result<()> {
    let posts = TempDir::new()?;
    let path = posts.path().join("undated-post.markdown");
    fs::write(
        &path,
        "---\nlayout: post\ndate: 2023-01-01 00:00:00 +0000\ncategories: [rust]\n---\n# Title\n\nText\n",
    )?;

    let mut tracker = Tracker::new(DocumentWalker::new(posts.path()));
    tracker.initialize()?;

    fs::write(
        &path,
        "---\nlayout: post\ndate: 2023-01-01 00:00:00 +0000\ncategories: [rust]\n---\n# Title\n\nMore text\n",
    )?;
    tracker.scan_cycle(&fixed_updater()?);

    assert_eq!(
        fs::read_to_string(&path)?,
        "---\nlayout: post\ndate: 2024-06-15 08:09:10 +0900\ncategories: [rust]\n---\n# Title\n\nMore text\n"
    );
    Ok(())
}

#[test]
fn test_deleted_post_leaves_table_quietly() -> Result<()> {
    let posts = TempDir::new()?;
    let path = posts.path().join("draft.md");
    fs::write(&path, "---\ntitle: Draft\n---\nbody")?;

    let mut tracker = Tracker::new(DocumentWalker::new(posts.path()));
    tracker.initialize()?;
    fs::remove_file(&path)?;

    let report = tracker.scan_cycle(&fixed_updater()?);
    assert_eq!(report.deleted, 1);
    assert!(tracker.table().is_empty());
    Ok(())
}

#[test]
fn test_wall_clock_stamp_format() -> Result<()> {
    let posts = TempDir::new()?;
    let path = posts.path().join("no-date-in-name.md");
    fs::write(&path, "---\ntitle: X\n---\nbody")?;

    let mut tracker = Tracker::new(DocumentWalker::new(posts.path()));
    tracker.initialize()?;

    fs::write(&path, "---\ntitle: X\n---\nbody 2")?;
    let updater = DateUpdater::new(FrontMatterFormat::new("---", "date")?);
    tracker.scan_cycle(&updater);

    let content = fs::read_to_string(&path)?;
    let stamp = updater
        .format()
        .date_value(&content)
        .expect("date line written");

    // YYYY-MM-DD HH:MM:SS +HH00
    assert_eq!(stamp.len(), 25);
    assert_eq!(&stamp[..10], Local::now().format("%Y-%m-%d").to_string());
    assert!(matches!(&stamp[20..21], "+" | "-"));
    assert!(stamp.ends_with("00"));
    assert!(content.ends_with("---\nbody 2"));
    Ok(())
}
