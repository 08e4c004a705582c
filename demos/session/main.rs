//! Scripted rotate-and-scale session against the in-memory workspace.
//!
//! Usage:
//! ```text
//! cargo run --example session                   # rotate and scale
//! cargo run --example session -- --rotate-only  # hold the rotation-only key
//! RUST_LOG=rotascale=debug cargo run --example session
//! ```

use std::time::Instant;

use rotascale::host::{Key, KeyEvent, ScreenEvent};
use rotascale::math::Point3;
use rotascale::scene::{EntityData, Scene, Selection, Workspace, WorkspaceConfig};
use rotascale::{ClickOutcome, PickSequence, Result};

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for rotascale.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("session=info".parse().unwrap_or_default())
        .add_directive("rotascale=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let rotate_only = std::env::args().any(|arg| arg == "--rotate-only");

    let mut scene = Scene::new();
    let square = scene.add_entity(EntityData::new(vec![
        Point3::new(100.0, 100.0, 0.0),
        Point3::new(110.0, 100.0, 0.0),
        Point3::new(110.0, 110.0, 0.0),
        Point3::new(100.0, 110.0, 0.0),
    ]));
    let mut workspace = Workspace::new(scene, WorkspaceConfig::default())?;
    workspace.select([square].into_iter().collect::<Selection>());

    let mut tool = PickSequence::new();
    tool.activate(&mut workspace);

    let picks = [
        ScreenEvent::new(100.1, 100.1),
        ScreenEvent::new(110.2, 99.8),
        ScreenEvent::new(100.0, 115.0),
    ];
    for (i, event) in picks.into_iter().enumerate() {
        if rotate_only && i == picks.len() - 1 {
            tool.on_key_down(&mut workspace, KeyEvent::new(Key::RotationOnly, Instant::now()));
        }
        tool.on_mouse_move(&mut workspace, event);
        tool.draw(&mut workspace);
        if let Some(label) = workspace.last_preview().and_then(|p| p.label.as_ref()) {
            println!("{}", label.text);
        }

        match tool.on_click(&mut workspace, event)? {
            ClickOutcome::Advanced(step) => {
                println!("{:?} -> {}", step, workspace.status_text().unwrap_or_default());
            }
            ClickOutcome::Applied(result) => {
                println!("applied:{}", result.matrix);
            }
            ClickOutcome::Cancelled(reason) => println!("cancelled: {reason:?}"),
            ClickOutcome::Ignored => println!("ignored"),
        }
    }

    for vertex in &workspace.scene().entity(square)?.vertices {
        println!("{:.3} {:.3} {:.3}", vertex.x, vertex.y, vertex.z);
    }
    Ok(())
}
