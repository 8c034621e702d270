//! Integration tests for the doc overlay and `<inheritdoc/>` resolution

use quill_core::cref::CRef;
use quill_core::model::{SymbolGraph, SymbolId};
use quill_core::testutil::{cyclic_library, test_library, test_library_overlay};
use quill_core::xmldoc::{load_xml_docs, DocElementKind, DocNode, InheritDocMode, XmlDocOverlay};

fn symbol(graph: &SymbolGraph, cref: &str) -> SymbolId {
    graph.find(&CRef::parse(cref).unwrap()).unwrap()
}

#[test]
fn test_own_documentation() {
    let graph = test_library();
    let overlay = test_library_overlay(InheritDocMode::Explicit).unwrap();
    let doc = overlay
        .resolve(&graph, symbol(&graph, "T:TestLibrary1.Class1"))
        .unwrap()
        .unwrap();

    assert!(!doc.is_inherited());
    assert_eq!(doc.summary().unwrap().plain_text(), "This is just some class.");
    assert_eq!(doc.remarks().unwrap().plain_text(), "A remark spanning two lines.");
    assert_eq!(doc.see_also().len(), 1);
    assert_eq!(doc.see_also()[0].attribute("cref"), Some("T:TestLibrary1.Generic1`2"));

    let code = doc.examples()[0].find(DocElementKind::Code).unwrap();
    assert_eq!(code.plain_text(), "var c = new Class1();\nc.DoStuff += handler;");
}

#[test]
fn test_param_and_returns_sections() {
    let graph = test_library();
    let overlay = test_library_overlay(InheritDocMode::Explicit).unwrap();
    let doc = overlay
        .resolve(&graph, symbol(&graph, "M:TestLibrary1.Class1.DoubleStatic(System.Double)"))
        .unwrap()
        .unwrap();

    assert_eq!(doc.param("n").unwrap().unwrap().plain_text(), "The value to double.");
    let returns = doc.returns().unwrap();
    assert!(returns
        .children
        .iter()
        .any(|node| matches!(node, DocNode::Element(e) if e.attribute("name") == Some("n"))));

    let exceptions = doc.exceptions();
    assert_eq!(exceptions.len(), 2);
    assert_eq!(exceptions[0].cref.as_ref().unwrap().as_str(), "T:System.ArgumentException");
    assert_eq!(exceptions[1].raw, "T:TestLibrary1.Missing");
}

#[test]
fn test_typeparam_sections() {
    let graph = test_library();
    let overlay = test_library_overlay(InheritDocMode::Explicit).unwrap();
    let doc = overlay
        .resolve(&graph, symbol(&graph, "M:TestLibrary1.Generic1`2.Junk1``1(``0)"))
        .unwrap()
        .unwrap();
    assert_eq!(doc.typeparam("TX").unwrap().unwrap().plain_text(), "A method type parameter.");
    assert!(doc.typeparam("TY").unwrap().is_none());
}

#[test]
fn test_override_inherits_from_base() {
    let graph = test_library();
    let overlay = test_library_overlay(InheritDocMode::Explicit).unwrap();
    let doc = overlay
        .resolve(&graph, symbol(&graph, "M:TestLibrary1.DerivedWidget.Render"))
        .unwrap()
        .unwrap();

    assert!(doc.is_inherited());
    assert_eq!(doc.cref().as_str(), "M:TestLibrary1.DerivedWidget.Render");
    assert_eq!(doc.source().as_str(), "M:TestLibrary1.BaseWidget.Render");
    assert_eq!(doc.summary().unwrap().plain_text(), "Renders the widget.");
}

#[test]
fn test_explicit_inheritdoc_cref() {
    let graph = test_library();
    let overlay = test_library_overlay(InheritDocMode::Explicit).unwrap();
    let doc = overlay
        .resolve(&graph, symbol(&graph, "M:TestLibrary1.DerivedWidget.Describe"))
        .unwrap()
        .unwrap();
    assert_eq!(doc.source().as_str(), "M:TestLibrary1.BaseWidget.Render");
}

#[test]
fn test_type_inherits_from_interface() {
    let graph = test_library();
    let overlay = test_library_overlay(InheritDocMode::Explicit).unwrap();
    let doc = overlay
        .resolve(&graph, symbol(&graph, "T:TestLibrary1.Thing"))
        .unwrap()
        .unwrap();
    assert_eq!(doc.source().as_str(), "T:TestLibrary1.IThing");
}

#[test]
fn test_missing_docs_follow_mode() {
    let graph = test_library();
    let implementation = symbol(&graph, "M:TestLibrary1.Thing.DoThing(System.Int32)");

    let explicit = test_library_overlay(InheritDocMode::Explicit).unwrap();
    assert!(explicit.resolve(&graph, implementation).unwrap().is_none());

    let implied = test_library_overlay(InheritDocMode::ExplicitOrMissing).unwrap();
    let doc = implied.resolve(&graph, implementation).unwrap().unwrap();
    assert_eq!(doc.source().as_str(), "M:TestLibrary1.IThing.DoThing(System.Int32)");
    assert_eq!(doc.param("count").unwrap().unwrap().plain_text(), "How many times.");
}

#[test]
fn test_undocumented_without_source_is_none() {
    let graph = test_library();
    let overlay = test_library_overlay(InheritDocMode::ExplicitOrMissing).unwrap();
    // Object.ToString lives in another library
    let doc = overlay
        .resolve(&graph, symbol(&graph, "M:TestLibrary1.Thing.ToString"))
        .unwrap();
    assert!(doc.is_none());
    assert!(overlay
        .resolve(&graph, symbol(&graph, "F:TestLibrary1.Class1.SomeField"))
        .unwrap()
        .is_none());
}

#[test]
fn test_inheritance_cycle_terminates() {
    let graph = cyclic_library();
    let xml = r#"<doc><members>
        <member name="T:Cycles.A"><inheritdoc/></member>
        <member name="T:Cycles.B"><inheritdoc/></member>
        <member name="M:Cycles.A.Run"><inheritdoc/></member>
        <member name="M:Cycles.B.Run"><inheritdoc/></member>
    </members></doc>"#;

    for mode in [InheritDocMode::Explicit, InheritDocMode::ExplicitOrMissing] {
        let overlay = XmlDocOverlay::from_source(load_xml_docs(xml).unwrap(), mode);
        for cref in ["T:Cycles.A", "T:Cycles.B", "M:Cycles.A.Run", "M:Cycles.B.Run"] {
            let found = overlay.resolve(&graph, symbol(&graph, cref)).unwrap();
            assert!(found.is_none(), "{cref}");
        }
    }
}

#[test]
fn test_cycle_keeps_best_result() {
    let graph = cyclic_library();
    let xml = r#"<doc><members>
        <member name="M:Cycles.A.Run"><inheritdoc/></member>
        <member name="M:Cycles.B.Run"><summary>From B.</summary></member>
    </members></doc>"#;
    let overlay = XmlDocOverlay::from_source(load_xml_docs(xml).unwrap(), InheritDocMode::Explicit);

    let doc = overlay
        .resolve(&graph, symbol(&graph, "M:Cycles.A.Run"))
        .unwrap()
        .unwrap();
    assert_eq!(doc.source().as_str(), "M:Cycles.B.Run");
    assert_eq!(doc.summary().unwrap().plain_text(), "From B.");
}
