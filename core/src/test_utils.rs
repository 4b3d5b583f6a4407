//! Shared test fixtures: a small host scene with recorded calls

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::anyhow;

use crate::host::{ObjectHost, TypeDef};
use crate::registry::{CommandDescriptor, CommandRegistry};

/// Messages recorded by fixture methods, in call order
pub type CallLog = Rc<RefCell<Vec<String>>>;

/// Live component with a parse-internally setter
#[derive(Debug, Default)]
pub struct TestClass {
    pub shows: u32,
    pub value: Option<i32>,
}

/// Plain type with a default constructor and overloaded methods
#[derive(Debug, Default)]
pub struct Foo {
    pub calls: u32,
}

/// Plain type without a default constructor
pub struct NoCtor;

/// Build the fixture host
///
/// - `TestClass` (live): `Show()`, `SetValue(v)`
/// - `Foo` (plain, default ctor): `Bar(x)`, `Bar(x, y)` twice, `Ping()`, `Count()`, `Fail()`
/// - `NoCtor` (plain): `Run()`
pub fn test_host() -> (ObjectHost, CallLog) {
    let log: CallLog = Rc::new(RefCell::new(Vec::new()));

    let show_log = log.clone();
    let set_log = log.clone();
    let test_class = TypeDef::<TestClass>::live_component("TestClass")
        .method("Show", 0, move |obj, _| {
            obj.shows += 1;
            show_log.borrow_mut().push(format!("Show triggered ({})", obj.shows));
            Ok(())
        })
        .method("SetValue", 1, move |obj, args| {
            let message = match args[0].parse::<i32>() {
                Ok(num) => {
                    obj.value = Some(num);
                    format!("{} has been set", num)
                }
                Err(_) => "Type mismatch".to_string(),
            };
            set_log.borrow_mut().push(message);
            Ok(())
        });

    let bar1_log = log.clone();
    let bar2_log = log.clone();
    let bar2b_log = log.clone();
    let ping_log = log.clone();
    let count_log = log.clone();
    let foo = TypeDef::<Foo>::plain("Foo")
        .with_default_constructor()
        .method("Bar", 1, move |_, args| {
            bar1_log.borrow_mut().push(format!("Bar/1 {}", args[0]));
            Ok(())
        })
        .method("Bar", 2, move |_, args| {
            bar2_log
                .borrow_mut()
                .push(format!("Bar/2 {} {}", args[0], args[1]));
            Ok(())
        })
        .method("Bar", 2, move |_, _| {
            bar2b_log.borrow_mut().push("Bar/2 shadowed".to_string());
            Ok(())
        })
        .method("Ping", 0, move |_, args| {
            ping_log.borrow_mut().push(format!("Ping with {} args", args.len()));
            Ok(())
        })
        .method("Count", 0, move |obj, _| {
            obj.calls += 1;
            count_log.borrow_mut().push(format!("Count {}", obj.calls));
            Ok(())
        })
        .method("Fail", 0, |_, _| Err(anyhow!("boom")));

    let no_ctor = TypeDef::<NoCtor>::plain("NoCtor").method("Run", 0, |_, _| Ok(()));

    let host = ObjectHost::builder()
        .register(test_class)
        .register(foo)
        .register(no_ctor)
        .build();

    (host, log)
}

/// Registry matching the fixture host
pub fn test_registry() -> CommandRegistry {
    CommandRegistry::from_descriptors([
        CommandDescriptor::new("show", "show", "Log from the test object", "TestClass.Show"),
        CommandDescriptor::new(
            "setval",
            "setval <int>",
            "Set the test value",
            "TestClass.SetValue",
        ),
        CommandDescriptor::new("bar", "bar <x> [y]", "Overloaded call", "Foo.Bar"),
        CommandDescriptor::new("ping", "ping", "Zero-arg call", "Foo.Ping"),
        CommandDescriptor::new("fail", "fail", "Always fails", "Foo.Fail"),
        CommandDescriptor::new("run", "run", "No default constructor", "NoCtor.Run"),
        CommandDescriptor::new("missing", "missing", "Unknown type", "Nope.Method"),
        CommandDescriptor::new("broken", "broken", "Malformed target", "NoDot"),
        CommandDescriptor::new("help", "help", "Toggle command help", "DebugConsole.ToggleHelp"),
    ])
    .expect("fixture ids are unique")
}

/// Snapshot of the call log
pub fn calls(log: &CallLog) -> Vec<String> {
    log.borrow().clone()
}
