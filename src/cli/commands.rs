//! Command dispatch and handlers

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::{output, render};
use crate::domain::{
    collect_forest_ids, find_in_forest, forest_total_cost, status_stats, total_cost, BomData,
    ComplianceData, Node, NodeId,
};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Tree { file }) => _tree(file),
        Some(Commands::Cost { file, id }) => _cost(file, id.map(NodeId::from)),
        Some(Commands::Status { file, as_of }) => _status(file, *as_of),
        Some(Commands::Check { file }) => _check(file),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

/// Reads a document holding either a single root object or an array of
/// roots; both are the record shapes the persistence layer exchanges.
fn load_forest<D: DeserializeOwned>(path: &Path) -> CliResult<Vec<Node<D>>> {
    let reader = BufReader::new(File::open(path)?);
    let value: Value = serde_json::from_reader(reader)?;
    let forest = match value {
        Value::Array(_) => serde_json::from_value::<Vec<Node<D>>>(value)?,
        _ => vec![serde_json::from_value::<Node<D>>(value)?],
    };
    Ok(forest)
}

#[instrument]
fn _tree(file: &Path) -> CliResult<()> {
    let forest: Vec<Node<BomData>> = load_forest(file)?;
    debug!("loaded {} root(s)", forest.len());

    for root in &forest {
        println!("{}", render::bom_tree(root));
    }
    let nodes = collect_forest_ids(&forest).len();
    let depth = forest.iter().map(|root| root.depth()).max().unwrap_or(0);
    output::action("nodes", &nodes);
    output::action("depth", &depth);
    output::action("total cost", &format!("{:.2}", forest_total_cost(&forest)));
    Ok(())
}

#[instrument]
fn _cost(file: &Path, id: Option<NodeId>) -> CliResult<()> {
    let forest: Vec<Node<BomData>> = load_forest(file)?;

    let cost = match id {
        Some(id) => {
            let node = find_in_forest(&forest, id)
                .ok_or(crate::domain::DomainError::NodeNotFound(id))?;
            total_cost(node)
        }
        None => forest_total_cost(&forest),
    };
    output::action("total cost", &format!("{cost:.2}"));
    Ok(())
}

#[instrument]
fn _status(file: &Path, as_of: Option<NaiveDate>) -> CliResult<()> {
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let forest: Vec<Node<ComplianceData>> = load_forest(file)?;

    for root in &forest {
        println!("{}", render::compliance_tree(root, as_of));
    }
    let stats = status_stats(&forest, as_of);
    output::header(&format!("status as of {as_of}"));
    output::action("compliant", &stats.compliant);
    output::action("expiring", &stats.expiring);
    output::action("missing", &stats.missing);
    output::action("total", &stats.total());
    Ok(())
}

#[instrument]
fn _check(file: &Path) -> CliResult<()> {
    let forest: Vec<Node<BomData>> = load_forest(file)?;
    let violations = audit(&forest);

    if violations.is_empty() {
        output::success(&format!("{}: document is well-formed", file.display()));
        Ok(())
    } else {
        output::error(&format!("{}:", file.display()));
        for violation in &violations {
            output::failure(violation);
        }
        Err(CliError::CheckFailed(violations.len()))
    }
}

/// Structural audit of a BOM forest: global id uniqueness, per-tree
/// designator uniqueness, level monotonicity, parent links and material
/// payload placement.
fn audit(forest: &[Node<BomData>]) -> Vec<String> {
    let mut violations = Vec::new();

    let mut seen_ids = HashSet::new();
    for id in collect_forest_ids(forest) {
        if !seen_ids.insert(id) {
            violations.push(format!("duplicate node id: {id}"));
        }
    }

    for root in forest {
        let mut seen_positions = HashSet::new();
        for node in root.iter_preorder() {
            if !seen_positions.insert(node.position.as_str()) {
                violations.push(format!("duplicate designator in tree: {}", node.position));
            }
            if node.data.material().is_some() != node.level.can_have_material() {
                violations.push(format!(
                    "{}: material payload does not match level {}",
                    node.position, node.level
                ));
            }
            if let Some(attrs) = node.data.material() {
                if attrs.quantity < 1 {
                    violations.push(format!("{}: quantity must be >= 1", node.position));
                }
                if attrs.cost < 0.0 {
                    violations.push(format!("{}: cost must be >= 0", node.position));
                }
            }
            for child in &node.children {
                if child.level <= node.level {
                    violations.push(format!(
                        "{}: child {} has level {}, not deeper than {}",
                        node.position, child.position, child.level, node.level
                    ));
                }
                if child.parent_id != Some(node.id) {
                    violations.push(format!(
                        "{}: parent link does not point at {}",
                        child.position, node.position
                    ));
                }
            }
        }
    }

    violations
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
