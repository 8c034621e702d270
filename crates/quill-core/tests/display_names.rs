//! Integration tests for display names over the sample library

use quill_core::display::DisplayNameFormatter;
use quill_core::model::{SymbolGraph, SymbolId, TypeId};
use quill_core::testutil::test_library;

fn class(graph: &SymbolGraph, name: &str, arity: usize) -> TypeId {
    graph.top_level_type("TestLibrary1", name, arity).unwrap()
}

fn method(graph: &SymbolGraph, ty: TypeId, name: &str, nth: usize) -> SymbolId {
    let id = graph
        .type_def(ty)
        .unwrap()
        .methods
        .iter()
        .copied()
        .filter(|&m| graph.method(m).unwrap().name == name)
        .nth(nth)
        .unwrap();
    SymbolId::Method(id)
}

#[test]
fn test_type_names() {
    let graph = test_library();
    let fmt = DisplayNameFormatter::new();
    let generic1 = class(&graph, "Generic1", 2);
    let inner = graph.nested_type(generic1, "Inner", 1).unwrap();

    assert_eq!(fmt.display_name(&graph, SymbolId::Type(class(&graph, "Class1", 0))).unwrap(), "Class1");
    assert_eq!(fmt.display_name(&graph, SymbolId::Type(generic1)).unwrap(), "Generic1<TA, TB>");
    assert_eq!(fmt.display_name(&graph, SymbolId::Type(inner)).unwrap(), "Inner<TC>");

    let qualified = DisplayNameFormatter::qualified();
    assert_eq!(
        qualified.display_name(&graph, SymbolId::Type(inner)).unwrap(),
        "TestLibrary1.Generic1<TA, TB>.Inner<TC>"
    );
}

#[test]
fn test_method_names() {
    let graph = test_library();
    let fmt = DisplayNameFormatter::new();
    let class1 = class(&graph, "Class1", 0);
    let generic1 = class(&graph, "Generic1", 2);
    let name = |symbol| fmt.display_name(&graph, symbol).unwrap();

    assert_eq!(name(method(&graph, class1, ".ctor", 0)), "Class1()");
    assert_eq!(name(method(&graph, class1, ".ctor", 1)), "Class1(String)");
    assert_eq!(name(method(&graph, class1, "DoubleStatic", 0)), "DoubleStatic(Double)");
    assert_eq!(
        name(method(&graph, class1, "TrySomeOutRefStuff", 0)),
        "TrySomeOutRefStuff(Int32&, Int32&)"
    );
    assert_eq!(name(method(&graph, class1, "op_Addition", 0)), "operator +(Class1, Class1)");
    assert_eq!(name(method(&graph, class1, "op_Implicit", 0)), "Implicit(Class1)");
    assert_eq!(name(method(&graph, class1, "Matrix", 0)), "Matrix(Double[,], Int32[][])");
    assert_eq!(name(method(&graph, generic1, "Junk1", 0)), "Junk1<TX>(TX)");
    assert_eq!(
        name(method(&graph, generic1, "Combine", 0)),
        "Combine(KeyValuePair<TA, TB>, Generic1<Int32, String>)"
    );
}

#[test]
fn test_property_names() {
    let graph = test_library();
    let fmt = DisplayNameFormatter::new();
    let class1 = graph.type_def(class(&graph, "Class1", 0)).unwrap();

    let item = SymbolId::Property(class1.properties[0]);
    let plain = SymbolId::Property(class1.properties[1]);
    assert_eq!(fmt.display_name(&graph, item).unwrap(), "Item[Int32]");
    assert_eq!(fmt.display_name(&graph, plain).unwrap(), "SomeProperty");
}

#[test]
fn test_declaring_type_prefix() {
    let graph = test_library();
    let class1 = class(&graph, "Class1", 0);
    let fmt = DisplayNameFormatter::new().with_declaring_type(true);
    let field = SymbolId::Field(graph.type_def(class1).unwrap().fields[0]);
    assert_eq!(fmt.display_name(&graph, field).unwrap(), "Class1.MyConst");

    let inner = graph.nested_type(class1, "Inner", 0).unwrap();
    assert_eq!(fmt.display_name(&graph, SymbolId::Type(inner)).unwrap(), "Class1.Inner");
}

#[test]
fn test_namespace_names() {
    let graph = test_library();
    let fmt = DisplayNameFormatter::new();
    let global = graph.namespace_by_name("").unwrap();
    let named = graph.namespace_by_name("TestLibrary1").unwrap();
    assert_eq!(fmt.display_name(&graph, SymbolId::Namespace(global)).unwrap(), "global");
    assert_eq!(fmt.display_name(&graph, SymbolId::Namespace(named)).unwrap(), "TestLibrary1");

    let in_global = graph.top_level_type("", "InGlobal", 0).unwrap();
    assert_eq!(
        DisplayNameFormatter::qualified()
            .display_name(&graph, SymbolId::Type(in_global))
            .unwrap(),
        "InGlobal"
    );
}

#[test]
fn test_formatter_options() {
    let graph = test_library();
    let generic1 = SymbolId::Type(class(&graph, "Generic1", 2));

    let compact = DisplayNameFormatter::new().with_list_separator(",");
    assert_eq!(compact.display_name(&graph, generic1).unwrap(), "Generic1<TA,TB>");

    let bare = DisplayNameFormatter::new().with_generic_parameters(false);
    assert_eq!(bare.display_name(&graph, generic1).unwrap(), "Generic1");

    let namespaced = DisplayNameFormatter::new().with_namespace(true);
    assert_eq!(
        namespaced.display_name(&graph, generic1).unwrap(),
        "TestLibrary1.Generic1<TA, TB>"
    );
}

#[test]
fn test_parameter_formatter() {
    let graph = test_library();
    let class1 = class(&graph, "Class1", 0);
    let fmt = DisplayNameFormatter::new().with_parameter_formatter(DisplayNameFormatter::qualified());
    assert_eq!(
        fmt.display_name(&graph, method(&graph, class1, "DoubleStatic", 0)).unwrap(),
        "DoubleStatic(System.Double)"
    );
}

#[test]
fn test_instance_type_names() {
    let graph = test_library();
    let class1 = class(&graph, "Class1", 0);
    let SymbolId::Method(make_inner) = method(&graph, class1, "MakeInner", 0) else {
        unreachable!()
    };
    let ret = graph.method(make_inner).unwrap().return_type.clone().unwrap();

    assert_eq!(DisplayNameFormatter::new().type_ref_name(&graph, &ret), "Inner<Double>");
    assert_eq!(
        DisplayNameFormatter::qualified().type_ref_name(&graph, &ret),
        "TestLibrary1.Generic1<System.Int32, System.String>.Inner<System.Double>"
    );
}

#[test]
fn test_names_are_never_empty() {
    let graph = test_library();
    for fmt in [DisplayNameFormatter::new(), DisplayNameFormatter::qualified()] {
        for symbol in graph.symbols() {
            let name = fmt.display_name(&graph, symbol).unwrap();
            assert!(!name.is_empty(), "{symbol:?}");
            assert_eq!(name, fmt.display_name(&graph, symbol).unwrap());
        }
    }
}
