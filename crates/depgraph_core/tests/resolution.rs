use depgraph_core::builder::GraphBuilder;
use depgraph_core::dependency::Dependency;
use depgraph_core::graph::{DependencyGraph, NodeId};
use depgraph_core::resolve::{ConflictResolver, ResolverConfig, Verbosity, VersionSelectionStrategy};
use depgraph_core::scope::Scope;
use depgraph_core::{Artifact, ArtifactCoordinate};
use depgraph_version::Version;

fn artifact(group: &str, id: &str, version: &str) -> Artifact {
    Artifact::new(ArtifactCoordinate::simple(group, id), Version::parse(version).unwrap())
}

fn dependency(group: &str, id: &str, version: &str, scope: &str) -> Dependency {
    Dependency::new(artifact(group, id, version), Scope::new(scope))
}

/// The observable parts of a resolved graph that a second, idempotent
/// resolve pass must leave untouched.
type GraphSnapshot = Vec<(NodeId, Vec<NodeId>, Option<Scope>, Option<bool>, Option<NodeId>, bool)>;

fn snapshot(graph: &DependencyGraph) -> GraphSnapshot {
    graph
        .ids()
        .map(|id| {
            let node = graph.node(id);
            (
                id,
                graph.children(id).to_vec(),
                node.derived_scope().cloned(),
                node.derived_optional(),
                node.winner(),
                node.is_winner(),
            )
        })
        .collect()
}

#[test]
fn no_conflict_keeps_every_distinct_artifact() {
    let mut builder = GraphBuilder::new();
    let root = builder.root();
    builder.add_simple(root, "org.example", "foo", "1.0");
    builder.add_simple(root, "org.example", "bar", "1.0");

    let mut graph = builder.build();
    let resolver = ConflictResolver::new(ResolverConfig::default());
    let report = resolver.resolve(&mut graph).unwrap();

    assert_eq!(report.conflict_groups_resolved, 2);
    assert_eq!(graph.children(graph.root()).len(), 2);
}

#[test]
fn nearest_wins_version_clash() {
    // foo -> baz:1.0 (depth 1) ; bar -> baz:2.0 (depth 2)
    let mut builder = GraphBuilder::new();
    let root = builder.root();
    let foo = builder.add(root, dependency("g", "foo", "1.0", "compile"));
    let bar = builder.add(root, dependency("g", "bar", "1.0", "compile"));
    builder.add(foo, dependency("g", "baz", "1.0", "compile"));
    builder.add(bar, dependency("g", "baz", "2.0", "compile"));

    let mut graph = builder.build();
    let resolver = ConflictResolver::new(ResolverConfig {
        version_strategy: VersionSelectionStrategy::Nearest,
        verbosity: Verbosity::Full,
        ..ResolverConfig::default()
    });
    resolver.resolve(&mut graph).unwrap();

    let foo_children = graph.children(foo);
    let baz_under_foo = foo_children[0];
    assert!(graph.node(baz_under_foo).is_winner());
    assert_eq!(
        graph.node(baz_under_foo).effective_artifact().unwrap().version,
        Version::parse("1.0").unwrap()
    );

    let bar_children = graph.children(bar);
    let baz_under_bar = bar_children[0];
    assert!(!graph.node(baz_under_bar).is_winner());
}

#[test]
fn highest_wins_when_configured() {
    let mut builder = GraphBuilder::new();
    let root = builder.root();
    let foo = builder.add(root, dependency("g", "foo", "1.0", "compile"));
    let bar = builder.add(root, dependency("g", "bar", "1.0", "compile"));
    builder.add(foo, dependency("g", "baz", "1.0", "compile"));
    builder.add(bar, dependency("g", "baz", "2.0", "compile"));

    let mut graph = builder.build();
    let resolver = ConflictResolver::new(ResolverConfig {
        version_strategy: VersionSelectionStrategy::Highest,
        ..ResolverConfig::default()
    });
    resolver.resolve(&mut graph).unwrap();

    let baz_under_foo = graph.children(foo)[0];
    assert_eq!(
        graph.node(baz_under_foo).effective_artifact().unwrap().version,
        Version::parse("2.0").unwrap()
    );
}

#[test]
fn scope_selection_picks_the_winners_scope_and_keeps_losers_annotated() {
    // foo -> bar(test) -> jaz ; foo -> baz -> jaz. Each path derives its own
    // scope for jaz (`test` through `bar`, `compile` through `baz`) before
    // conflict resolution ever runs; resolution then picks one winner for
    // the shared conflict id and, under FULL verbosity, keeps the loser
    // around annotated with a pointer to the winner rather than removing it.
    let mut builder = GraphBuilder::new();
    let root = builder.root();
    let foo = builder.add(root, dependency("g", "foo", "1.0", "compile"));
    let bar = builder.add(foo, dependency("g", "bar", "1.0", "test"));
    let baz = builder.add(foo, dependency("g", "baz", "1.0", "compile"));
    builder.add(bar, dependency("g", "jaz", "1.0", "compile"));
    builder.add(baz, dependency("g", "jaz", "1.0", "compile"));

    let mut graph = builder.build();
    let resolver = ConflictResolver::new(ResolverConfig {
        verbosity: Verbosity::Full,
        ..ResolverConfig::default()
    });
    resolver.resolve(&mut graph).unwrap();

    let jaz_under_bar = graph.children(bar)[0];
    let jaz_under_baz = graph.children(baz)[0];

    // `bar`'s occurrence was seen first (nearest tie-break keeps first-seen
    // order) and wins; the group's `application` scope priority then settles
    // on `compile` (it outranks `test`), so the winner's own `test`
    // derivation is overridden and preserved only as its original value.
    assert!(graph.node(jaz_under_bar).is_winner());
    assert_eq!(graph.node(jaz_under_bar).derived_scope(), Some(&Scope::compile()));
    assert_eq!(graph.node(jaz_under_bar).original_scope(), Some(&Scope::test()));

    // The loser is retained (FULL verbosity) with its own per-path scope
    // untouched, annotated with a pointer back to the winner.
    assert!(!graph.node(jaz_under_baz).is_winner());
    assert_eq!(graph.node(jaz_under_baz).derived_scope(), Some(&Scope::compile()));
    assert_eq!(graph.node(jaz_under_baz).winner(), Some(jaz_under_bar));
}

#[test]
fn optional_direct_dependency_still_pulls_in_its_own_children() {
    let mut builder = GraphBuilder::new();
    let root = builder.root();
    let foo = builder.add(root, dependency("g", "foo", "1.0", "compile").optional(true));
    builder.add(foo, dependency("g", "bar", "1.0", "compile"));

    let mut graph = builder.build();
    let resolver = ConflictResolver::new(ResolverConfig::default());
    resolver.resolve(&mut graph).unwrap();

    let bar = graph.children(foo)[0];
    assert_eq!(graph.node(bar).derived_optional(), Some(true));
}

#[test]
fn non_optional_path_wins_optionality_selection_over_an_optional_one() {
    // foo -> bar(optional) -> jaz ; foo -> baz -> jaz. Even though `bar`'s
    // occurrence of `jaz` is nearer to winning on depth alone, the selected
    // optionality for the group is non-optional because `baz`'s path
    // contributes a non-optional edge.
    let mut builder = GraphBuilder::new();
    let root = builder.root();
    let foo = builder.add(root, dependency("g", "foo", "1.0", "compile"));
    let bar = builder.add(foo, dependency("g", "bar", "1.0", "compile").optional(true));
    let baz = builder.add(foo, dependency("g", "baz", "1.0", "compile"));
    builder.add(bar, dependency("g", "jaz", "1.0", "compile"));
    builder.add(baz, dependency("g", "jaz", "1.0", "compile"));

    let mut graph = builder.build();
    let resolver = ConflictResolver::new(ResolverConfig::default());
    resolver.resolve(&mut graph).unwrap();

    let jaz_under_bar = graph.children(bar)[0];
    assert!(graph.node(jaz_under_bar).is_winner());
    assert_eq!(graph.node(jaz_under_bar).derived_optional(), Some(false));
}

#[test]
fn standard_verbosity_keeps_exactly_one_loser_per_parent() {
    // a -> b -> c:1 ; a -> c:2 ; and a second loser occurrence of c:1 under
    // the same parent `b` (via an extra child) to exercise the
    // one-loser-per-(parent, conflict group) rule: the first loser seen
    // under `b` is kept (annotated, children cleared), any further loser
    // under that same parent is removed outright.
    let mut builder = GraphBuilder::new();
    let root = builder.root();
    let a = builder.add(root, dependency("g", "a", "1.0", "compile"));
    let b = builder.add(a, dependency("g", "b", "1.0", "compile"));
    let c_loser_1 = builder.add(b, dependency("g", "c", "1.0", "compile"));
    let c_loser_2 = builder.add(b, dependency("g", "c", "1.0", "compile"));
    let c_winner = builder.add(a, dependency("g", "c", "2.0", "compile"));

    let mut graph = builder.build();
    let resolver = ConflictResolver::new(ResolverConfig {
        version_strategy: VersionSelectionStrategy::Highest,
        verbosity: Verbosity::Standard,
        ..ResolverConfig::default()
    });
    resolver.resolve(&mut graph).unwrap();

    let b_children = graph.children(b);
    assert_eq!(b_children.len(), 1, "exactly one loser kept under `b`");
    let kept = b_children[0];
    assert!(kept == c_loser_1 || kept == c_loser_2);
    assert!(!graph.node(kept).is_winner());
    assert_eq!(graph.node(kept).winner(), Some(c_winner));
    assert!(graph.children(kept).is_empty(), "retained loser's own children are cleared");

    assert!(graph.node(c_winner).is_winner());
    assert_eq!(
        graph.node(c_winner).effective_artifact().unwrap().version,
        Version::parse("2.0").unwrap()
    );
}

#[test]
fn self_referential_cycle_is_pruned_and_does_not_hang() {
    let mut builder = GraphBuilder::new();
    let root = builder.root();
    let foo = builder.add(root, dependency("g", "foo", "1.0", "compile"));
    let bar = builder.add(foo, dependency("g", "bar", "1.0", "compile"));
    let baz = builder.add(bar, dependency("g", "baz", "1.0", "compile"));
    builder.add(baz, dependency("g", "bar", "1.0", "compile"));

    let mut graph = builder.build();
    let resolver = ConflictResolver::new(ResolverConfig::default());
    resolver.resolve(&mut graph).unwrap();

    assert!(graph.children(baz).is_empty());
}

#[test]
fn hard_constraint_rejecting_every_candidate_is_reported_as_unsolvable() {
    let mut builder = GraphBuilder::new();
    let root = builder.root();
    let foo = builder.add(root, dependency("g", "foo", "1.0", "compile"));
    let bar = builder.add(root, dependency("g", "bar", "1.0", "compile"));
    let baz1 = builder.add(foo, dependency("g", "baz", "1.0", "compile"));
    let baz2 = builder.add(bar, dependency("g", "baz", "1.5", "compile"));
    builder.with_constraint(baz1, "[2.0,3.0)");
    builder.with_constraint(baz2, "[2.0,3.0)");

    let mut graph = builder.build();
    let resolver = ConflictResolver::new(ResolverConfig::default());
    let err = resolver.resolve(&mut graph).unwrap_err();
    assert!(matches!(
        err,
        depgraph_core::ResolveError::UnsolvableVersionConflict(_)
    ));
}

#[test]
fn resolving_an_already_resolved_graph_is_idempotent_under_full_verbosity() {
    // foo -> bar(test) -> jaz ; foo -> baz -> jaz, the same scope-derivation
    // scenario as `scope_selection_picks_the_winners_scope_and_keeps_losers_annotated`,
    // but here run through the pipeline twice: a second pass over an
    // already-resolved graph must reproduce exactly the same winners, the
    // same retained/annotated losers and the same report, never drifting.
    let mut builder = GraphBuilder::new();
    let root = builder.root();
    let foo = builder.add(root, dependency("g", "foo", "1.0", "compile"));
    let bar = builder.add(foo, dependency("g", "bar", "1.0", "test"));
    let baz = builder.add(foo, dependency("g", "baz", "1.0", "compile"));
    builder.add(bar, dependency("g", "jaz", "1.0", "compile"));
    builder.add(baz, dependency("g", "jaz", "1.0", "compile"));

    let mut graph = builder.build();
    let resolver = ConflictResolver::new(ResolverConfig {
        verbosity: Verbosity::Full,
        ..ResolverConfig::default()
    });

    let first_report = resolver.resolve(&mut graph).unwrap();
    let after_first = snapshot(&graph);

    let second_report = resolver.resolve(&mut graph).unwrap();
    let after_second = snapshot(&graph);

    assert_eq!(after_first, after_second);
    assert_eq!(
        first_report.conflict_groups_resolved,
        second_report.conflict_groups_resolved
    );
    assert_eq!(first_report.cyclic_conflict_ids, second_report.cyclic_conflict_ids);
}

#[test]
fn resolving_an_already_resolved_graph_is_idempotent_under_none_verbosity() {
    // A plain nearest-wins version clash under the default (`None`)
    // verbosity, which actually removes losers from the graph rather than
    // annotating them — re-resolving the now-pruned graph must be a no-op.
    let mut builder = GraphBuilder::new();
    let root = builder.root();
    let foo = builder.add(root, dependency("g", "foo", "1.0", "compile"));
    let bar = builder.add(root, dependency("g", "bar", "1.0", "compile"));
    builder.add(foo, dependency("g", "baz", "1.0", "compile"));
    builder.add(bar, dependency("g", "baz", "2.0", "compile"));

    let mut graph = builder.build();
    let resolver = ConflictResolver::new(ResolverConfig::default());

    let first_report = resolver.resolve(&mut graph).unwrap();
    let after_first = snapshot(&graph);

    let second_report = resolver.resolve(&mut graph).unwrap();
    let after_second = snapshot(&graph);

    assert_eq!(after_first, after_second);
    assert_eq!(
        first_report.conflict_groups_resolved,
        second_report.conflict_groups_resolved
    );
}
