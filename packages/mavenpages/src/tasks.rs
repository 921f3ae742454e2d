//! # Task Registry
//!
//! Named operations the CLI can run. Names are matched case-insensitively
//! after trimming. The registry is an ordinary value built once at startup
//! and handed to every task through its [`TaskContext`], so aggregate tasks
//! (`build`, `clean`) call their sub-tasks through it rather than through any
//! global state.
//!
//! Each task runs inside a `task` tracing span carrying the name it was
//! registered under; everything it logs is labelled with that name.

use console::style;
use indexmap::IndexMap;
use tracing::{debug, info, info_span};

use crate::checksum::ChecksumGenerator;
use crate::cleanup;
use crate::constants::DEFAULT_DESCRIPTOR_TEMPLATE;
use crate::descriptor::DescriptorSynthesizer;
use crate::index::IndexRenderer;
use crate::layout::RepoLayout;
use crate::preflight;
use crate::util::{RepoError, RepoResult};

/// Task used when no task is requested
pub const DEFAULT_TASK: &str = "help";

type TaskFn = Box<dyn Fn(&TaskContext<'_>) -> RepoResult<()>>;

/// A registered operation
pub struct Task {
    name: String,
    description: String,
    mutating: bool,
    op: TaskFn,
}

impl Task {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the task may modify the repository (and so needs preflight)
    pub fn is_mutating(&self) -> bool {
        self.mutating
    }
}

/// Everything a running task can reach
pub struct TaskContext<'a> {
    /// Name the running task was registered under
    pub task: &'a str,
    pub layout: &'a RepoLayout,
    pub registry: &'a TaskRegistry,
}

impl TaskContext<'_> {
    /// Run another registered task with the same layout
    pub fn run(&self, name: &str) -> RepoResult<()> {
        self.registry.run(name, self.layout)
    }
}

/// Name → operation mapping
#[derive(Default)]
pub struct TaskRegistry {
    tasks: IndexMap<String, Task>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in task
    pub fn with_builtin_tasks() -> RepoResult<Self> {
        let mut registry = Self::new();
        register_builtin_tasks(&mut registry)?;
        Ok(registry)
    }

    /// Register `op` under `name`.
    ///
    /// Registering a name twice replaces the earlier operation; the name keeps
    /// its original position in [`TaskRegistry::tasks`].
    pub fn register<F>(&mut self, name: &str, description: &str, mutating: bool, op: F) -> RepoResult<()>
    where
        F: Fn(&TaskContext<'_>) -> RepoResult<()> + 'static,
    {
        let key = normalize(name);
        if key.is_empty() {
            return Err(RepoError::InvalidArgument(format!(
                "task name must not be empty, got '{name}'"
            )));
        }

        let task = Task {
            name: key.clone(),
            description: description.to_string(),
            mutating,
            op: Box::new(op),
        };
        if self.tasks.insert(key, task).is_some() {
            debug!(task = %normalize(name), "task re-registered, previous operation replaced");
        }
        Ok(())
    }

    /// Look up a task by name
    pub fn resolve(&self, name: &str) -> RepoResult<&Task> {
        self.tasks
            .get(&normalize(name))
            .ok_or_else(|| RepoError::TaskNotFound(name.trim().to_string()))
    }

    /// Registered tasks in registration order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Run one task by name inside its span
    pub fn run(&self, name: &str, layout: &RepoLayout) -> RepoResult<()> {
        let task = self.resolve(name)?;
        self.execute(task, layout)
    }

    fn execute(&self, task: &Task, layout: &RepoLayout) -> RepoResult<()> {
        let span = info_span!("task", task = %task.name);
        let _guard = span.enter();
        debug!("starting");
        let context = TaskContext {
            task: &task.name,
            layout,
            registry: self,
        };
        (task.op)(&context)?;
        debug!("finished");
        Ok(())
    }

    /// Run the requested tasks in order.
    ///
    /// An empty request means [`DEFAULT_TASK`]. Every name is resolved before
    /// anything runs, so an unknown name aborts without touching the tree.
    /// The preflight check runs once, first, when any requested task mutates.
    /// The first failing task aborts the remaining ones.
    pub fn run_requested<S: AsRef<str>>(&self, requested: &[S], layout: &RepoLayout) -> RepoResult<()> {
        let tasks = if requested.is_empty() {
            vec![self.resolve(DEFAULT_TASK)?]
        } else {
            requested
                .iter()
                .map(|name| self.resolve(name.as_ref()))
                .collect::<RepoResult<Vec<_>>>()?
        };

        if tasks.iter().any(|task| task.is_mutating()) {
            preflight::check(layout)?;
        }

        for task in tasks {
            self.execute(task, layout)?;
        }
        Ok(())
    }
}

fn build_poms(ctx: &TaskContext<'_>) -> RepoResult<()> {
    let template = match ctx.layout.descriptor_template_path() {
        Some(path) => fs_err::read_to_string(path)?,
        None => DEFAULT_DESCRIPTOR_TEMPLATE.to_string(),
    };
    DescriptorSynthesizer::new(ctx.layout, template).synthesize()?;
    Ok(())
}

fn build_checksums(ctx: &TaskContext<'_>) -> RepoResult<()> {
    let config = ctx.layout.config();
    let content_root = ctx.layout.content_root();
    ChecksumGenerator::new(&content_root, &config.tracked_extensions(), &config.algorithms).generate()?;
    Ok(())
}

fn build_indices(ctx: &TaskContext<'_>) -> RepoResult<()> {
    IndexRenderer::for_layout(ctx.layout)?.render_all()?;
    Ok(())
}

fn help(ctx: &TaskContext<'_>) -> RepoResult<()> {
    println!("{}", style("Usage: mavenpages [OPTIONS] [TASK]...").bold());
    println!();
    println!("Tasks:");
    let width = ctx.registry.tasks().map(|t| t.name().len()).max().unwrap_or(0);
    for task in ctx.registry.tasks() {
        println!(
            "  {}  {}",
            style(format!("{:width$}", task.name(), width = width)).cyan(),
            task.description()
        );
    }
    println!();
    println!("Tasks run in the order given. Run `mavenpages --help` for options.");
    Ok(())
}

/// Register `help`, the build tasks and the clean tasks
pub fn register_builtin_tasks(registry: &mut TaskRegistry) -> RepoResult<()> {
    registry.register("help", "List the available tasks", false, help)?;

    registry.register(
        "build",
        "Run build-poms, build-checksums and build-indices",
        true,
        |ctx| {
            for sub_task in ["build-poms", "build-checksums", "build-indices"] {
                ctx.run(sub_task)?;
            }
            info!("repository metadata up to date");
            Ok(())
        },
    )?;
    registry.register(
        "build-poms",
        "Write a descriptor for every artifact directory that lacks one",
        true,
        build_poms,
    )?;
    registry.register(
        "build-checksums",
        "Write missing checksum sidecars for archives, descriptors and metadata",
        true,
        build_checksums,
    )?;
    registry.register(
        "build-indices",
        "Regenerate directory indices, rewriting only those that changed",
        true,
        build_indices,
    )?;

    registry.register(
        "clean",
        "Run clean-poms, clean-checksums and clean-indices",
        true,
        |ctx| {
            for sub_task in ["clean-poms", "clean-checksums", "clean-indices"] {
                ctx.run(sub_task)?;
            }
            Ok(())
        },
    )?;
    registry.register(
        "clean-poms",
        "Does nothing: descriptors are never removed automatically",
        true,
        |ctx| cleanup::clean_descriptors(&ctx.layout.content_root()).map(|_| ()),
    )?;
    registry.register(
        "clean-checksums",
        "Delete every checksum sidecar",
        true,
        |ctx| cleanup::clean_checksums(&ctx.layout.content_root()).map(|_| ()),
    )?;
    registry.register(
        "clean-indices",
        "Delete every directory index",
        true,
        |ctx| {
            let layout = ctx.layout;
            cleanup::clean_indices(&layout.content_root(), &layout.config().index.file_name).map(|_| ())
        },
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RepoConfig;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn layout() -> RepoLayout {
        RepoLayout::new("/nonexistent-repo".into(), RepoConfig::default())
    }

    fn recording(log: &Rc<RefCell<Vec<String>>>, label: &str) -> impl Fn(&TaskContext<'_>) -> RepoResult<()> {
        let log = Rc::clone(log);
        let label = label.to_string();
        move |_ctx| {
            log.borrow_mut().push(label.clone());
            Ok(())
        }
    }

    #[test]
    fn test_resolve_normalizes_names() {
        let mut registry = TaskRegistry::new();
        registry.register("  Build-Poms ", "", false, |_| Ok(())).unwrap();

        assert_eq!(registry.resolve("build-poms").unwrap().name(), "build-poms");
        assert_eq!(registry.resolve(" BUILD-POMS").unwrap().name(), "build-poms");
        assert!(matches!(registry.resolve("build"), Err(RepoError::TaskNotFound(name)) if name == "build"));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut registry = TaskRegistry::new();
        let err = registry.register("   ", "", false, |_| Ok(())).unwrap_err();
        assert!(matches!(err, RepoError::InvalidArgument(_)));
    }

    #[test]
    fn test_last_registration_wins() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        registry.register("first", "", false, |_| Ok(())).unwrap();
        registry.register("dup", "old", false, recording(&log, "old")).unwrap();
        registry.register("DUP", "new", false, recording(&log, "new")).unwrap();

        registry.run("dup", &layout()).unwrap();
        assert_eq!(*log.borrow(), vec!["new"]);
        assert_eq!(registry.resolve("dup").unwrap().description(), "new");
        let names: Vec<_> = registry.tasks().map(Task::name).collect();
        assert_eq!(names, ["first", "dup"]);
    }

    #[test]
    fn test_run_requested_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        registry.register("a", "", false, recording(&log, "a")).unwrap();
        registry.register("b", "", false, recording(&log, "b")).unwrap();

        registry.run_requested(&["b", "a", "b"], &layout()).unwrap();
        assert_eq!(*log.borrow(), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_unknown_task_aborts_before_running_anything() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        registry.register("a", "", false, recording(&log, "a")).unwrap();

        let err = registry.run_requested(&["a", "missing"], &layout()).unwrap_err();
        assert!(matches!(err, RepoError::TaskNotFound(name) if name == "missing"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_empty_request_runs_default_task() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        registry.register(DEFAULT_TASK, "", false, recording(&log, "help")).unwrap();

        registry.run_requested::<&str>(&[], &layout()).unwrap();
        assert_eq!(*log.borrow(), vec!["help"]);
    }

    #[test]
    fn test_mutating_task_requires_preflight() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        registry.register("write", "", true, recording(&log, "write")).unwrap();

        let err = registry.run_requested(&["write"], &layout()).unwrap_err();
        assert!(matches!(err, RepoError::Preflight { .. }));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_failing_task_stops_the_run() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        registry
            .register("fail", "", false, |_| Err(RepoError::InvalidArgument("boom".into())))
            .unwrap();
        registry.register("after", "", false, recording(&log, "after")).unwrap();

        assert!(registry.run_requested(&["fail", "after"], &layout()).is_err());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_context_carries_task_name_and_registry() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = TaskRegistry::new();
        let seen = Rc::clone(&log);
        registry
            .register("Outer", "", false, move |ctx| {
                seen.borrow_mut().push(ctx.task.to_string());
                ctx.run("inner")
            })
            .unwrap();
        registry.register("inner", "", false, recording(&log, "inner")).unwrap();

        registry.run("outer", &layout()).unwrap();
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_builtin_tasks() {
        let registry = TaskRegistry::with_builtin_tasks().unwrap();
        let names: Vec<_> = registry.tasks().map(Task::name).collect();
        assert_eq!(
            names,
            [
                "help",
                "build",
                "build-poms",
                "build-checksums",
                "build-indices",
                "clean",
                "clean-poms",
                "clean-checksums",
                "clean-indices",
            ]
        );
        assert!(!registry.resolve("help").unwrap().is_mutating());
        assert!(registry.tasks().filter(|t| t.name() != "help").all(Task::is_mutating));
    }
}
