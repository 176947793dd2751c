use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use omniprof_core::config::OmniprofConfig;
use omniprof_core::date_range::DateRange;
use omniprof_core::event::{ClassId, OwnerId};
use omniprof_core::ics::{CalendarMetadata, ICS_MIME_TYPE};
use omniprof_core::interchange;
use omniprof_core::store::EventStore;
use owo_colors::OwoColorize;

pub struct ExportArgs {
    pub class_id: Option<ClassId>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub output: Option<PathBuf>,
}

pub fn run<S: EventStore>(
    store: &S,
    config: &OmniprofConfig,
    owner: &OwnerId,
    args: ExportArgs,
) -> Result<()> {
    let range = DateRange::from_args(args.from.as_deref(), args.to.as_deref())?;
    let metadata = CalendarMetadata::from(config);
    let ics = interchange::export_ics(store, owner, args.class_id, &range, &metadata)?;

    let output = match args.output {
        Some(path) => path,
        None => PathBuf::from(default_filename(store, owner, args.class_id)?),
    };

    if output == Path::new("-") {
        std::io::stdout()
            .write_all(ics.as_bytes())
            .context("Failed to write to stdout")?;
        return Ok(());
    }

    std::fs::write(&output, &ics)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let count = ics.lines().filter(|l| *l == "BEGIN:VEVENT").count();
    println!(
        "{} {}",
        format!("  Exported {} event(s) to {}", count, output.display()).green(),
        format!("({ICS_MIME_TYPE})").dimmed()
    );

    Ok(())
}

fn default_filename<S: EventStore>(
    store: &S,
    owner: &OwnerId,
    class_id: Option<ClassId>,
) -> Result<String> {
    let class_name = match class_id {
        Some(id) => store
            .list_classes(owner)?
            .into_iter()
            .find(|c| c.id == id)
            .map(|c| c.name),
        None => None,
    };

    Ok(interchange::suggested_filename(owner, class_name.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use omniprof_core::interchange::import_ics;
    use omniprof_core::store::MemoryStore;

    const SOURCE: &str = "BEGIN:VCALENDAR\n\
BEGIN:VEVENT\n\
SUMMARY:TP Circuits 3A\n\
DTSTART:20231020T100000Z\n\
DTEND:20231020T120000Z\n\
END:VEVENT\n\
END:VCALENDAR\n";

    #[test]
    fn test_export_writes_requested_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.ics");

        let mut store = MemoryStore::new();
        let owner = OwnerId::from("1");
        import_ics(&mut store, SOURCE, &owner).unwrap();

        let args = ExportArgs {
            class_id: None,
            from: None,
            to: None,
            output: Some(output.clone()),
        };
        run(&store, &OmniprofConfig::default(), &owner, args).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(written.contains("SUMMARY:TP Circuits 3A\r\n"));
        assert!(written.contains("UID:1@omniprof.app\r\n"));
        assert!(written.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn test_export_rejects_bad_range() {
        let store = MemoryStore::new();
        let args = ExportArgs {
            class_id: None,
            from: Some("yesterday".to_string()),
            to: None,
            output: Some(PathBuf::from("-")),
        };

        let err = run(&store, &OmniprofConfig::default(), &OwnerId::from("1"), args).unwrap_err();
        assert!(err.to_string().contains("Invalid date format"));
    }

    #[test]
    fn test_default_filename_uses_class_name() {
        let mut store = MemoryStore::new();
        let owner = OwnerId::from("1");
        let class = store.create_class(&owner, "3A").unwrap();

        assert_eq!(
            default_filename(&store, &owner, Some(class.id)).unwrap(),
            "omniprof-3a.ics"
        );
        assert_eq!(
            default_filename(&store, &owner, None).unwrap(),
            "omniprof-owner-1.ics"
        );
    }
}
