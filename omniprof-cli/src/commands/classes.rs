use anyhow::Result;
use omniprof_core::event::OwnerId;
use omniprof_core::store::EventStore;
use owo_colors::OwoColorize;

pub fn list<S: EventStore>(store: &S, owner: &OwnerId) -> Result<()> {
    let classes = store.list_classes(owner)?;

    if classes.is_empty() {
        println!(
            "{}",
            "  No classes yet. Add one with: omniprof classes add <name>".dimmed()
        );
        return Ok(());
    }

    for class in classes {
        println!("  {} {}", format!("{:>3}", class.id).dimmed(), class.name);
    }

    Ok(())
}

pub fn add<S: EventStore>(store: &mut S, owner: &OwnerId, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Class name cannot be empty");
    }

    let class = store.create_class(owner, name)?;
    println!("{}", format!("  Created class {} ({})", class.name, class.id).green());

    Ok(())
}
