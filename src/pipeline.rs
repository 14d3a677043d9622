//! The analyze action: validate, build, lay out, render, save

use crate::form::{FormError, FormField, Reflection, Session, ValidationError};
use crate::graph::{spring_layout, DisplayGraph, Layout, LayoutConfig};
use crate::render::{render_svg, Figure, RenderError, RenderOptions, SvgOptions};
use crate::storage::{ReflectionStore, StorageError};
use std::io::Write;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that end a single user action
#[derive(Debug, Error)]
pub enum DesireError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Form error: {0}")]
    Form(#[from] FormError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl DesireError {
    /// Validation failures are warnings the user can fix and retry.
    pub fn is_warning(&self) -> bool {
        matches!(self, DesireError::Validation(_))
    }
}

pub type DesireResult<T> = Result<T, DesireError>;

/// Options for one analysis run
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub layout: LayoutConfig,
    pub legend: bool,
    pub svg: SvgOptions,
}

/// A non-blocking remark about the submitted answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// An outcome was left empty; it is still drawn as an unlabeled node
    EmptyOutcome(FormField),
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::EmptyOutcome(field) => write!(f, "{} is empty", field),
        }
    }
}

/// Everything produced by a successful analysis
#[derive(Debug, Clone)]
pub struct Analysis {
    pub reflection: Reflection,
    pub graph: DisplayGraph,
    pub layout: Layout,
    pub figure: Figure,
    pub svg: String,
    pub notices: Vec<Notice>,
}

impl Analysis {
    /// Write the primary result of a run: the display graph and layout as
    /// JSON, or a plain-text tree. Nothing else is written to `out`.
    pub fn write_report<W: Write>(&self, out: &mut W, json: bool) -> std::io::Result<()> {
        if json {
            let payload = serde_json::json!({
                "graph": self.graph,
                "layout": self.layout,
            });
            serde_json::to_writer_pretty(&mut *out, &payload)?;
            return writeln!(out);
        }

        let reflection = &self.reflection;
        writeln!(out, "Reflection Tree for {}", reflection.name)?;
        writeln!(out, "  {}", reflection.main_desire)?;
        for entry in &reflection.entries {
            writeln!(
                out,
                "  ├─ [{:<8}] {} → {}",
                entry.link_type, entry.sub_desire, entry.outcome
            )?;
        }
        Ok(())
    }
}

/// Validate the session's form and build the chart
///
/// Nothing is built when validation fails.
pub fn analyze(session: &Session, options: &AnalyzeOptions) -> DesireResult<Analysis> {
    let reflection = match session.form.validate() {
        Ok(reflection) => reflection,
        Err(e) => {
            warn!(session = %session.id, missing = ?e.missing, "analysis rejected");
            return Err(e.into());
        }
    };

    let notices: Vec<Notice> = session
        .form
        .empty_outcomes()
        .into_iter()
        .map(Notice::EmptyOutcome)
        .collect();
    for notice in &notices {
        warn!(session = %session.id, "{}", notice);
    }

    let graph = DisplayGraph::from_reflection(&reflection);
    let layout = spring_layout(&graph, &options.layout);
    debug!(
        session = %session.id,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        seed = options.layout.seed,
        "laid out reflection tree"
    );

    let render_options = RenderOptions::new()
        .with_title(format!("Reflection Tree for {}", reflection.name))
        .with_legend(options.legend);
    let figure = Figure::build(&graph, &layout, &render_options);
    let svg = render_svg(&figure, &options.svg)?;

    Ok(Analysis {
        reflection,
        graph,
        layout,
        figure,
        svg,
        notices,
    })
}

/// Append the analyzed reflection to the table
pub fn save(session: &Session, analysis: &Analysis, store: &dyn ReflectionStore) -> DesireResult<()> {
    store.append(&analysis.reflection)?;
    info!(
        session = %session.id,
        location = %store.location().display(),
        "reflection saved"
    );
    Ok(())
}

/// Analyze and save in one step
pub fn submit(
    session: &Session,
    store: &dyn ReflectionStore,
    options: &AnalyzeOptions,
) -> DesireResult<Analysis> {
    let analysis = analyze(session, options)?;
    save(session, &analysis, store)?;
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FormState, LinkType};
    use crate::storage::SqliteStore;

    fn session(main_desire: &str) -> Session {
        let mut form = FormState::new();
        form.name = "Alice".into();
        form.main_desire = main_desire.into();
        for (slot, sub) in form.subs.iter_mut().enumerate() {
            sub.sub_desire = format!("Sub {}", slot + 1);
            sub.outcome = format!("Outcome {}", slot + 1);
        }
        form.set_link(2, LinkType::Unclear).unwrap();
        Session::with_form(form)
    }

    #[test]
    fn analysis_builds_titled_chart() {
        let analysis = analyze(&session("Peace"), &AnalyzeOptions::default()).unwrap();
        assert_eq!(analysis.graph.node_count(), 7);
        assert_eq!(analysis.figure.title.as_deref(), Some("Reflection Tree for Alice"));
        assert!(analysis.svg.contains("Reflection Tree for Alice"));
        assert!(analysis.notices.is_empty());
    }

    #[test]
    fn empty_main_desire_stops_before_saving() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = submit(&session(""), &store, &AnalyzeOptions::default()).unwrap_err();

        assert!(err.is_warning());
        assert!(matches!(
            &err,
            DesireError::Validation(v) if v.missing == vec![FormField::MainDesire]
        ));
        assert_eq!(store.row_count().unwrap(), 0);
    }

    #[test]
    fn empty_outcome_is_flagged_not_rejected() {
        let mut s = session("Peace");
        s.form.subs[1].outcome.clear();

        let analysis = analyze(&s, &AnalyzeOptions::default()).unwrap();
        assert_eq!(analysis.notices, vec![Notice::EmptyOutcome(FormField::Outcome(1))]);
        assert_eq!(analysis.notices[0].to_string(), "Outcome 2 is empty");
    }

    #[test]
    fn submit_saves_one_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        let analysis = submit(&session("Peace"), &store, &AnalyzeOptions::default()).unwrap();

        let rows = store.load_all().unwrap();
        assert_eq!(rows, vec![analysis.reflection]);
    }

    #[test]
    fn json_report_is_a_single_document() {
        let analysis = analyze(&session("Peace"), &AnalyzeOptions::default()).unwrap();
        let mut out = Vec::new();
        analysis.write_report(&mut out, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["graph"]["nodes"].as_array().map(Vec::len), Some(7));
        assert_eq!(value["graph"]["edges"].as_array().map(Vec::len), Some(6));
        assert_eq!(value["layout"]["positions"].as_array().map(Vec::len), Some(7));
    }

    #[test]
    fn text_report_lists_every_branch() {
        let analysis = analyze(&session("Peace"), &AnalyzeOptions::default()).unwrap();
        let mut out = Vec::new();
        analysis.write_report(&mut out, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Reflection Tree for Alice\n  Peace\n"));
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("[Unclear ] Sub 3 → Outcome 3"));
    }

    #[test]
    fn legend_option_reaches_the_figure() {
        let options = AnalyzeOptions {
            legend: true,
            ..AnalyzeOptions::default()
        };
        let analysis = analyze(&session("Peace"), &options).unwrap();
        assert_eq!(analysis.figure.legend.map(|l| l.len()), Some(3));
    }
}
