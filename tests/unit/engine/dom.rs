use super::*;

#[test]
fn builds_and_serializes() {
    let mut doc = Document::new();
    let p = doc.create_element("p");
    doc.add_class(p, "hero").unwrap();
    let t = doc.create_text("a < b & c");
    doc.append_child(p, t).unwrap();
    let br = doc.create_element("br");
    doc.append_child(p, br).unwrap();
    doc.append_child(doc.body(), p).unwrap();

    assert_eq!(
        doc.outer_html(p),
        "<p class=\"hero\">a &lt; b &amp; c<br></p>"
    );
    assert_eq!(doc.text_content(p), "a < b & c");
    assert_eq!(doc.elements_by_class("hero"), vec![p]);
}

#[test]
fn parses_fragments_with_classes_and_styles() {
    let doc = Document::from_html(
        r#"<h1 class="hero big" style="color: red; margin:0">Hi <em>there</em></h1><p>x</p>"#,
    )
    .unwrap();
    let h1 = doc.elements_by_class("hero")[0];
    assert_eq!(doc.tag(h1), Some("h1"));
    assert!(doc.has_class(h1, "big"));
    assert_eq!(doc.style(h1, "color"), Some("red"));
    assert_eq!(doc.style(h1, "margin"), Some("0"));
    assert_eq!(doc.text_content(h1), "Hi there");
    assert_eq!(doc.children(doc.body()).len(), 2);
}

#[test]
fn clone_is_detached_and_deep() {
    let mut doc = Document::from_html("<div class=\"a\"><span>x</span>y</div>").unwrap();
    let div = doc.elements_by_class("a")[0];
    let copy = doc.clone_subtree(div).unwrap();
    assert!(!doc.is_connected(copy));
    assert_eq!(doc.inner_html(copy), doc.inner_html(div));

    doc.remove_children(div).unwrap();
    assert_eq!(doc.inner_html(div), "");
    assert_eq!(doc.text_content(copy), "xy");
}

#[test]
fn class_queries_skip_detached_nodes() {
    let mut doc = Document::from_html("<p class=\"a\">1</p><p class=\"a\">2</p>").unwrap();
    let first = doc.elements_by_class("a")[0];
    doc.detach(first).unwrap();
    assert_eq!(doc.elements_by_class("a").len(), 1);
    assert!(!doc.is_connected(first));
}

#[test]
fn rejects_cycles_and_text_parents() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    let b = doc.create_element("div");
    doc.append_child(a, b).unwrap();
    assert!(doc.append_child(b, a).is_err());
    let t = doc.create_text("x");
    assert!(doc.append_child(t, a).is_err());
}

#[test]
fn rects_default_to_zero() {
    let mut doc = Document::new();
    let a = doc.create_element("div");
    assert_eq!(doc.rect(a), Rect::ZERO);
    doc.set_rect(a, Rect::new(0.0, 100.0, 200.0, 150.0)).unwrap();
    assert_eq!(doc.rect(a).height(), 50.0);
}
