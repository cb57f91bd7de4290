//! Task registry and ordered execution.
//!
//! Tasks are registered by unique name and may depend on tasks registered
//! later; dependencies are resolved when a run is planned. Edges point from a
//! dependency to its dependent, so a topological sort yields a valid
//! execution order.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Dfs, Reversed};
use tracing::{debug, error, info};

use super::execute_action;
use super::types::{CompletedTask, Task, TaskError, TaskReport};

#[derive(Debug, Default)]
pub struct TaskGraph {
  tasks: Vec<Task>,
  by_name: HashMap<String, usize>,
}

impl TaskGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a task. Names are unique across the graph.
  pub fn define(&mut self, task: Task) -> Result<(), TaskError> {
    if self.by_name.contains_key(&task.name) {
      return Err(TaskError::DuplicateTask(task.name));
    }
    debug!(task = %task.name, kind = task.action.kind(), "defined task");
    self.by_name.insert(task.name.clone(), self.tasks.len());
    self.tasks.push(task);
    Ok(())
  }

  pub fn get(&self, name: &str) -> Option<&Task> {
    self.by_name.get(name).map(|&i| &self.tasks[i])
  }

  pub fn contains(&self, name: &str) -> bool {
    self.by_name.contains_key(name)
  }

  /// Task names in registration order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.tasks.iter().map(|t| t.name.as_str())
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  /// Node `i` of the returned graph is task `i`.
  fn dependency_graph(&self) -> Result<DiGraph<usize, ()>, TaskError> {
    let mut graph = DiGraph::with_capacity(self.tasks.len(), 0);
    for i in 0..self.tasks.len() {
      graph.add_node(i);
    }

    for (i, task) in self.tasks.iter().enumerate() {
      for dep in &task.depends_on {
        let &dep_idx = self.by_name.get(dep).ok_or_else(|| TaskError::UnknownDependency {
          task: task.name.clone(),
          dependency: dep.clone(),
        })?;
        graph.add_edge(NodeIndex::new(dep_idx), NodeIndex::new(i), ());
      }
    }

    Ok(graph)
  }

  /// The tasks needed to run `targets`, dependencies first.
  ///
  /// Only the targets and their transitive dependencies are included.
  pub fn plan(&self, targets: &[&str]) -> Result<Vec<&Task>, TaskError> {
    let graph = self.dependency_graph()?;
    let sorted = toposort(&graph, None).map_err(|_| TaskError::CycleDetected)?;

    let reversed = Reversed(&graph);
    let mut needed = HashSet::new();
    for target in targets {
      let &idx = self
        .by_name
        .get(*target)
        .ok_or_else(|| TaskError::UnknownTask(target.to_string()))?;
      let mut dfs = Dfs::new(reversed, NodeIndex::new(idx));
      while let Some(node) = dfs.next(reversed) {
        needed.insert(node);
      }
    }

    Ok(
      sorted
        .into_iter()
        .filter(|node| needed.contains(node))
        .map(|node| &self.tasks[graph[node]])
        .collect(),
    )
  }

  /// Run `targets` and their dependencies one at a time.
  ///
  /// Planning errors are returned before anything runs. Once running, the
  /// first failing task stops the chain and is recorded in the report.
  pub async fn run_in_order(&self, targets: &[&str]) -> Result<TaskReport, TaskError> {
    let plan = self.plan(targets)?;
    info!(targets = ?targets, tasks = plan.len(), "running tasks");

    let mut report = TaskReport::default();
    let mut remaining = plan.into_iter();

    while let Some(task) = remaining.next() {
      info!(task = %task.name, kind = task.action.kind(), "starting task");
      let started = Instant::now();

      match execute_action(&task.action).await {
        Ok(()) => {
          let duration = started.elapsed();
          debug!(task = %task.name, ?duration, "task completed");
          report.completed.push(CompletedTask {
            name: task.name.clone(),
            duration,
          });
        }
        Err(err) => {
          error!(task = %task.name, error = %err, "task failed");
          report.failed = Some((task.name.clone(), err));
          report.not_run = remaining.map(|t| t.name.clone()).collect();
          break;
        }
      }
    }

    Ok(report)
  }
}
