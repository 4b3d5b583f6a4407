//! Demo scene exposed to the console
//!
//! A handful of host types standing in for game objects, plus the command
//! list used when no console.toml is found.

use anyhow::Context;
use nethercore_devconsole::{CommandDescriptor, ConsoleConfig, ObjectHost, TypeDef};

/// Live component used to exercise the console
#[derive(Debug, Default)]
pub struct TestClass {
    pub value: Option<i32>,
}

/// Live component with game-like state
#[derive(Debug)]
pub struct Player {
    pub health: i32,
    pub position: (f32, f32),
}

impl Default for Player {
    fn default() -> Self {
        Self {
            health: 100,
            position: (0.0, 0.0),
        }
    }
}

/// Plain type, constructed fresh for every call
#[derive(Debug, Default)]
pub struct Greeter;

/// Plain type without a default constructor
pub struct Spawner;

/// Build the demo host with all scene types registered
pub fn build_host() -> ObjectHost {
    let test_class = TypeDef::<TestClass>::live_component("TestClass")
        .method("Show", 0, |obj, _| {
            tracing::info!(value = ?obj.value, "Show triggered");
            Ok(())
        })
        .method("SetValue", 1, |obj, args| {
            match args[0].parse::<i32>() {
                Ok(num) => {
                    obj.value = Some(num);
                    tracing::info!("{} has been set", num);
                }
                Err(_) => tracing::info!("Type mismatch"),
            }
            Ok(())
        });

    let player = TypeDef::<Player>::live_component("Player")
        .method("Status", 0, |obj, _| {
            tracing::info!(
                "health {} at ({}, {})",
                obj.health,
                obj.position.0,
                obj.position.1
            );
            Ok(())
        })
        .method("Heal", 1, |obj, args| {
            let amount: i32 = args[0]
                .parse()
                .with_context(|| format!("'{}' is not a whole number", args[0]))?;
            obj.health = (obj.health + amount).min(100);
            tracing::info!("healed to {}", obj.health);
            Ok(())
        })
        .method("Teleport", 2, |obj, args| {
            let x: f32 = args[0].parse().context("invalid x coordinate")?;
            let y: f32 = args[1].parse().context("invalid y coordinate")?;
            obj.position = (x, y);
            tracing::info!("teleported to ({}, {})", x, y);
            Ok(())
        });

    let greeter = TypeDef::<Greeter>::plain("Greeter")
        .with_default_constructor()
        .method("Hello", 0, |_, _| {
            tracing::info!("hello!");
            Ok(())
        })
        .method("Hello", 1, |_, args| {
            tracing::info!("hello, {}!", args[0]);
            Ok(())
        });

    let spawner = TypeDef::<Spawner>::plain("Spawner").method("Spawn", 0, |_, _| Ok(()));

    ObjectHost::builder()
        .register(test_class)
        .register(player)
        .register(greeter)
        .register(spawner)
        .build()
}

/// Command list used when no configuration file exists
pub fn demo_config() -> ConsoleConfig {
    ConsoleConfig {
        console: Default::default(),
        commands: vec![
            CommandDescriptor::new(
                "help",
                "help",
                "Toggle command help",
                "DebugConsole.ToggleHelp",
            ),
            CommandDescriptor::new("show", "show", "Log from the test object", "TestClass.Show"),
            CommandDescriptor::new(
                "setval",
                "setval <int>",
                "Set the test value",
                "TestClass.SetValue",
            ),
            CommandDescriptor::new("status", "status", "Print player status", "Player.Status"),
            CommandDescriptor::new("heal", "heal <amount>", "Heal the player", "Player.Heal"),
            CommandDescriptor::new(
                "teleport",
                "teleport <x> <y>",
                "Move the player",
                "Player.Teleport",
            ),
            CommandDescriptor::new("hello", "hello [name]", "Say hello", "Greeter.Hello"),
            CommandDescriptor::new("spawn", "spawn", "Spawn an enemy", "Spawner.Spawn"),
        ],
    }
}
