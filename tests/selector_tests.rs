#[cfg(test)]
mod tests {
    use depquery::selectors::{SELECTORS, Sign, Tag, lookup};
    use depquery::*;

    // a -> b -> c -> d, a -> c, b.test -> b, b.test -> x
    fn graph() -> Graph {
        let mut graph = Graph::new();
        for node in [
            Node::new("a").main(),
            Node::new("b"),
            Node::new("c"),
            Node::new("d"),
            Node::new("x"),
            Node::new("b.test").test_for("b"),
        ] {
            graph.add_node(node).unwrap();
        }
        for (from, to) in [
            ("a", "b"),
            ("a", "c"),
            ("b", "c"),
            ("c", "d"),
            ("b.test", "b"),
            ("b.test", "x"),
        ] {
            graph.add_import(from, to).unwrap();
        }
        graph
    }

    fn cyclic() -> Graph {
        let mut graph = Graph::new();
        for id in ["p", "q", "r"] {
            graph.add_node(Node::new(id)).unwrap();
        }
        graph.add_import("p", "q").unwrap();
        graph.add_import("q", "p").unwrap();
        graph.add_import("q", "r").unwrap();
        graph
    }

    fn run(graph: &Graph, query: &str) -> Result<Vec<String>, EvalError> {
        let expr = compile(query).unwrap().unwrap();
        Evaluator::new(graph)
            .evaluate(&expr)
            .map(|nodes| nodes.into_iter().collect())
    }

    fn select(query: &str) -> Vec<String> {
        run(&graph(), query).unwrap_or_else(|e| panic!("{}: {}", query, e))
    }

    // ========================================================================
    // Registry
    // ========================================================================

    #[test]
    fn test_registry_contents() {
        let names: Vec<&str> = SELECTORS.iter().map(|def| def.name).collect();
        assert_eq!(names, vec!["all", "import", "importer", "main", "test", "source"]);
        assert!(SELECTORS.iter().all(|def| !def.summary.is_empty()));
    }

    #[test]
    fn test_lookup_ignores_sign() {
        let tag = Tag::parse("-test");
        assert_eq!(tag.sign, Sign::Remove);
        assert!(lookup(tag.name).is_some());
        assert!(lookup("-test").is_none());
    }

    // ========================================================================
    // Individual selectors
    // ========================================================================

    #[test]
    fn test_all() {
        assert_eq!(select("a:all"), vec!["a", "b", "c", "d"]);
        assert_eq!(select("d:all"), vec!["d"]);
    }

    #[test]
    fn test_import() {
        assert_eq!(select("a:import"), vec!["b", "c"]);
        assert!(select("d:import").is_empty());
    }

    #[test]
    fn test_importer_hides_test_variants() {
        assert_eq!(select("c:importer"), vec!["a", "b"]);
        assert_eq!(select("b:importer"), vec!["a"]);
        assert_eq!(select("test=1(b:importer)"), vec!["a", "b.test"]);
    }

    #[test]
    fn test_main() {
        assert_eq!(select("(a b c d):main"), vec!["a"]);
    }

    #[test]
    fn test_test_selector() {
        assert_eq!(select("b:test"), vec!["b.test"]);
        assert!(select("a:test").is_empty());
        // Exact ids always resolve, even for hidden variants
        assert_eq!(select("b.test:test"), vec!["b.test"]);
    }

    #[test]
    fn test_source() {
        assert_eq!(select("(a b c d):source"), vec!["a"]);
        // b is only imported by its hidden test variant and by a
        assert!(select("b:source").is_empty());
    }

    #[test]
    fn test_all_from_test_variant() {
        assert_eq!(select("b.test:all"), vec!["b", "b.test", "c", "d", "x"]);
        assert_eq!(select("b:test:all"), select("b.test:all"));
    }

    // ========================================================================
    // Signs and chains
    // ========================================================================

    #[test]
    fn test_add_sign() {
        assert_eq!(select("a:+import"), vec!["a", "b", "c"]);
        assert_eq!(select("(a + b):+test"), vec!["a", "b", "b.test"]);
    }

    #[test]
    fn test_remove_sign() {
        assert_eq!(select("a:-import"), vec!["a"]);
        assert_eq!(select("a:all:-main"), vec!["b", "c", "d"]);
        assert_eq!(select("(b b.test):-test"), vec!["b"]);
    }

    #[test]
    fn test_chain_applies_left_to_right() {
        assert_eq!(select("a:import:all"), vec!["b", "c", "d"]);
        assert!(select("a:import:main").is_empty());
        assert_eq!(select("a:main:import"), vec!["b", "c"]);
    }

    #[test]
    fn test_selector_on_empty_set() {
        assert!(select("missing:all").is_empty());
    }

    #[test]
    fn test_unknown_selector_keeps_sign_in_error() {
        assert_eq!(
            run(&graph(), "a:bogus"),
            Err(EvalError::UnknownSelector("bogus".into()))
        );
        assert_eq!(
            run(&graph(), "a:+bogus"),
            Err(EvalError::UnknownSelector("+bogus".into()))
        );
    }

    // ========================================================================
    // Cycles
    // ========================================================================

    #[test]
    fn test_cycles_terminate() {
        let graph = cyclic();
        assert_eq!(run(&graph, "p:all").unwrap(), vec!["p", "q", "r"]);
        assert_eq!(run(&graph, "r:importer:importer").unwrap(), vec!["p"]);
    }

    #[test]
    fn test_deps_reaches_start_through_cycle() {
        let graph = cyclic();
        assert_eq!(run(&graph, "deps(p)").unwrap(), vec!["p", "q", "r"]);
        assert_eq!(run(&graph, "deps(r)").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_reach_in_cycle() {
        let graph = cyclic();
        assert_eq!(run(&graph, "reach(p q r, p)").unwrap(), vec!["p", "q"]);
    }
}
