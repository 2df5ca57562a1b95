use dagger::{Graph, GraphConfig, Node, TypedId};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Dagger Graph v{}", dagger::version());
    println!("==========================================");
    println!();

    let config = match std::env::args().nth(1) {
        Some(path) => GraphConfig::from_file(path)?,
        None => GraphConfig::default(),
    };
    let graph = Graph::with_config(config);

    let alice = TypedId::new("user", "1");
    let bob = TypedId::new("user", "2");
    let carol = TypedId::new("user", "3");

    graph.add_node(Node::with_attributes(alice.clone(), vec![("name", "Alice")]));
    graph.add_node(Node::with_attributes(bob.clone(), vec![("name", "Bob")]));
    graph.add_node(Node::with_attributes(carol.clone(), vec![("name", "Carol")]));
    println!("✓ Created users: Alice, Bob, Carol");

    graph.connect(&alice, &bob, "friend", true)?;
    println!("✓ Alice <-[friend]-> Bob");
    graph.connect(&carol, &alice, "follows", false)?;
    println!("✓ Carol -[follows]-> Alice");

    print_edges(&graph, "friend", &alice);
    print_edges(&graph, "friend", &bob);

    let json = graph.node_to_json(&alice)?;
    println!("\nAlice as JSON: {}", String::from_utf8_lossy(&json));

    graph.del_node(&alice);
    println!("\n✓ Removed Alice");
    print_edges(&graph, "friend", &bob);
    println!(
        "  Carol follows {} user(s)",
        graph.cursor_from("follows", &carol).count()
    );

    println!("\nGraph Statistics:");
    println!("  Total nodes: {}", graph.node_count());
    println!("  Total edges: {}", graph.edge_count());
    Ok(())
}

fn print_edges(graph: &Graph, edge_type: &str, source: &TypedId) {
    let name = graph
        .get_node(source)
        .map(|n| n.get_string("name"))
        .unwrap_or_default();
    let targets: Vec<String> = graph
        .filter_edges_from(edge_type, source, |_| true)
        .iter()
        .filter_map(|e| graph.get_node(e.to()))
        .map(|n| n.get_string("name"))
        .collect();
    println!("  {} -[{}]-> {:?}", name, edge_type, targets);
}
