use xpathquill::document::parser::parse_html;
use xpathquill::document::tree::DocumentTree;
use xpathquill::document::NodeId;
use xpathquill::file::loader::load_sample_page;
use xpathquill::xpath::segments::parse_segments;
use xpathquill::xpath::{breadcrumb, Evaluator, PathGenerator, Strategy};

fn elements(tree: &DocumentTree) -> Vec<NodeId> {
    tree.descendants(tree.document())
}

fn find_by_id(tree: &DocumentTree, id: &str) -> NodeId {
    elements(tree)
        .into_iter()
        .find(|&n| tree[n].id() == Some(id))
        .unwrap()
}

#[test]
fn test_identifier_paths_match_their_element() {
    let tree = load_sample_page().unwrap();
    let evaluator = Evaluator::new(&tree);
    let generator = PathGenerator::new(&tree);

    let with_id: Vec<NodeId> = elements(&tree)
        .into_iter()
        .filter(|&n| tree[n].id().is_some())
        .collect();
    assert!(!with_id.is_empty());

    for node in with_id {
        let generated = generator.generate(node);
        assert_eq!(generated.strategy, Strategy::Identifier);
        let matches = evaluator.evaluate(&generated.text()).unwrap();
        assert_eq!(matches.single(), Some(node), "{}", generated.text());
    }
}

#[test]
fn test_login_identifier_scenario() {
    let tree = load_sample_page().unwrap();
    let login = find_by_id(&tree, "login");

    let matches = Evaluator::new(&tree).evaluate(r#"//*[@id="login"]"#).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches.primary().unwrap().node, login);
}

#[test]
fn test_unique_class_set_identifies_element() {
    let tree = parse_html(
        r#"<div class="card featured">a</div><div class="card">b</div><div class="card">c</div>"#,
    )
    .unwrap();
    let body = tree.body().unwrap();
    let featured = tree[body].children()[0];

    let generator = PathGenerator::new(&tree);
    let candidate = generator.class_candidate(featured).unwrap();
    let matches = Evaluator::new(&tree).evaluate_expression(&candidate);
    assert_eq!(matches.single(), Some(featured));
    assert_eq!(generator.generate(featured).strategy, Strategy::ClassCandidate);
}

#[test]
fn test_shared_class_set_falls_through_to_ancestor_chain() {
    let tree = parse_html(
        r#"<div class="card featured">a</div>
           <section class="card featured">b</section>
           <div>c</div>"#,
    )
    .unwrap();
    let body = tree.body().unwrap();
    let target = tree[body].children()[0];

    let generator = PathGenerator::new(&tree);
    let candidate = generator.class_candidate(target).unwrap();
    assert_eq!(Evaluator::new(&tree).evaluate_expression(&candidate).len(), 2);

    let generated = generator.generate(target);
    assert_eq!(generated.strategy, Strategy::AncestorChain);
    assert_eq!(generated.text(), "/html/body/div[1]");
    assert!(generated.expression.steps.iter().any(|s| s.ordinal().is_some()));
}

#[test]
fn test_removing_ordinal_widens_to_every_div() {
    let tree = parse_html(
        "<div><span>1</span></div>
         <div><span>2</span></div>
         <div><span>3</span><p><span>nested</span></p></div>
         <section><div><span>deep</span></div></section>",
    )
    .unwrap();
    let evaluator = Evaluator::new(&tree);

    let path = "/html/body/div[3]/span";
    assert_eq!(evaluator.evaluate(path).unwrap().len(), 1);

    let widened = breadcrumb::remove_ordinal(path, 2).unwrap().unwrap();
    assert_eq!(widened, "/html/body/div/span");
    let matches = evaluator.evaluate(&widened).unwrap();
    let texts: Vec<String> = matches
        .iter()
        .map(|m| tree.text_content(m.node))
        .collect();
    assert_eq!(texts, vec!["1", "2", "3"]);
}

#[test]
fn test_segment_round_trip_evaluates_identically() {
    let tree = load_sample_page().unwrap();
    let evaluator = Evaluator::new(&tree);

    for path in [
        "/html/body/main/div[2]/h2",
        r#"//*[@id="content"]/div[contains(@class,"card")]"#,
        "//nav/a/@href",
        r#"//  form /input[@name="user"]"#,
        "//main/div[last()]/h2",
    ] {
        let parsed = parse_segments(path).unwrap();
        let joined = parsed.join();
        assert_eq!(
            evaluator.evaluate(&joined).unwrap(),
            evaluator.evaluate(path).unwrap(),
            "{} -> {}",
            path,
            joined
        );
    }
}

#[test]
fn test_evaluation_is_idempotent() {
    let tree = load_sample_page().unwrap();
    let evaluator = Evaluator::new(&tree);
    let first = evaluator.evaluate("//a").unwrap();
    let second = evaluator.evaluate("//a").unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
}

#[test]
fn test_unbalanced_bracket_is_a_parse_error() {
    let tree = load_sample_page().unwrap();
    let error = Evaluator::new(&tree).evaluate("//div[@id='x'").unwrap_err();
    assert!(error.is_parse_error());

    let error = Evaluator::new(&tree).evaluate("//div[frob(1)]").unwrap_err();
    assert!(!error.is_parse_error());
}

#[test]
fn test_link_paths_select_href() {
    let tree = load_sample_page().unwrap();
    let link = elements(&tree)
        .into_iter()
        .find(|&n| tree[n].attribute("href") == Some("/products"))
        .unwrap();

    let generated = PathGenerator::new(&tree).generate(link);
    assert!(generated.text().ends_with("/@href"), "{}", generated.text());
    let matches = Evaluator::new(&tree).evaluate(&generated.text()).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches.primary().unwrap().value.as_deref(), Some("/products"));
}
