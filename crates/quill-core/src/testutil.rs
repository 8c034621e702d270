//! Test utilities for Quill
//!
//! Sample graphs and doc files shared by unit tests, integration tests and
//! benchmarks. `test_library` mirrors a small compiled library with the
//! usual awkward cases: overloads, by-ref parameters, conversion operators,
//! nested generics, interface implementations and the global
//! namespace.

use crate::model::{
    EventDef, FieldDef, GraphBuilder, MethodDef, PropertyDef, SymbolGraph, TypeKind, TypeRef,
    Visibility, EXTENSION_ATTRIBUTE, FLAGS_ATTRIBUTE,
};
use crate::xmldoc::{load_xml_docs, DocLoadError, DocSource, InheritDocMode, XmlDocOverlay};

/// Library name of [`test_library`]
pub const TEST_LIBRARY_NAME: &str = "TestLibrary1";

/// Library name of [`system_library`]
pub const SYSTEM_LIBRARY_NAME: &str = "mscorlib";

/// XML doc file matching [`test_library`]
pub const TEST_LIBRARY_DOCS: &str = r#"<?xml version="1.0"?>
<doc>
  <assembly>
    <name>TestLibrary1</name>
  </assembly>
  <members>
    <member name="N:TestLibrary1">
      <summary>Sample types.</summary>
    </member>
    <member name="T:TestLibrary1.Class1">
      <summary>This is just some class.</summary>
      <remarks>
        A remark spanning
        two lines.
      </remarks>
      <example>
        <code>var c = new Class1();
c.DoStuff += handler;</code>
      </example>
      <seealso cref="T:TestLibrary1.Generic1`2"/>
    </member>
    <member name="M:TestLibrary1.Class1.#ctor">
      <summary>Creates an instance.</summary>
    </member>
    <member name="M:TestLibrary1.Class1.DoubleStatic(System.Double)">
      <summary>Doubles a value.</summary>
      <param name="n">The value to double.</param>
      <returns>Twice <paramref name="n"/>.</returns>
      <exception cref="T:System.ArgumentException">When <paramref name="n"/> is not a number.</exception>
      <exception cref="T:TestLibrary1.Missing">Never.</exception>
    </member>
    <member name="M:TestLibrary1.Class1.TrySomeOutRefStuff(System.Int32@,System.Int32@)">
      <param name="a">First output.</param>
      <param name="b">Second output.</param>
    </member>
    <member name="P:TestLibrary1.Class1.Item(System.Int32)">
      <summary>Gets a value by position.</summary>
      <param name="n">The position.</param>
      <value>The stored value.</value>
    </member>
    <member name="F:TestLibrary1.Class1.MyConst">
      <summary>A constant.</summary>
      <value>Always one.</value>
    </member>
    <member name="T:TestLibrary1.Generic1`2">
      <summary>A generic type.</summary>
      <typeparam name="TA">The first parameter.</typeparam>
      <typeparam name="TB">The second parameter.</typeparam>
    </member>
    <member name="M:TestLibrary1.Generic1`2.Junk1``1(``0)">
      <summary>Junk.</summary>
      <typeparam name="TX">A method type parameter.</typeparam>
      <param name="a">Some value.</param>
    </member>
    <member name="T:TestLibrary1.IThing">
      <summary>Something that does a thing.</summary>
    </member>
    <member name="M:TestLibrary1.IThing.DoThing(System.Int32)">
      <summary>Does the thing.</summary>
      <param name="count">How many times.</param>
    </member>
    <member name="T:TestLibrary1.Thing">
      <inheritdoc/>
    </member>
    <member name="M:TestLibrary1.BaseWidget.Render">
      <summary>Renders the widget.</summary>
    </member>
    <member name="M:TestLibrary1.DerivedWidget.Render">
      <inheritdoc/>
    </member>
    <member name="M:TestLibrary1.DerivedWidget.Describe">
      <inheritdoc cref="M:TestLibrary1.BaseWidget.Render"/>
    </member>
    <member name="T:TestLibrary1.Callback">
      <summary>Called back.</summary>
      <param name="value">The value passed along.</param>
      <returns>Whether to continue.</returns>
    </member>
    <member name="T:InGlobal">
      <summary>Lives in the global namespace.</summary>
    </member>
  </members>
</doc>
"#;

/// XML doc file matching [`system_library`]
pub const SYSTEM_LIBRARY_DOCS: &str = r#"<?xml version="1.0"?>
<doc>
  <members>
    <member name="T:System.Object">
      <summary>The root of the type hierarchy.</summary>
    </member>
    <member name="M:System.Object.ToString">
      <summary>Returns a string that represents the current object.</summary>
    </member>
    <member name="T:System.ArgumentException">
      <summary>Thrown when an argument is invalid.</summary>
    </member>
  </members>
</doc>
"#;

/// Build the `TestLibrary1` sample graph
pub fn test_library() -> SymbolGraph {
    let int32 = TypeRef::system("Int32");
    let double = TypeRef::system("Double");
    let string = TypeRef::system("String");

    let mut b = GraphBuilder::new(TEST_LIBRARY_NAME);

    let class1 = b.add_type("TestLibrary1", "Class1", TypeKind::Class);
    let class1_ref = TypeRef::Defined(class1);
    b.type_mut(class1).base_type = Some(TypeRef::system("Object"));
    b.add_method(class1, MethodDef::constructor());
    b.add_method(class1, MethodDef::constructor().with_parameter("crap", string.clone()));
    b.add_method(class1, MethodDef::static_constructor());
    b.add_method(class1, MethodDef::new("BlankStatic").with_static());
    b.add_method(
        class1,
        MethodDef::new("DoubleStatic")
            .with_static()
            .with_parameter("n", double.clone())
            .returns(double.clone()),
    );
    b.add_method(
        class1,
        MethodDef::new("DoubleStatic")
            .with_static()
            .with_parameter("n", int32.clone())
            .returns(double.clone()),
    );
    b.add_method(
        class1,
        MethodDef::new("TrySomeOutRefStuff")
            .with_out_parameter("a", int32.clone())
            .with_out_parameter("b", int32.clone())
            .returns(TypeRef::system("Boolean")),
    );
    b.add_method(
        class1,
        MethodDef::new("op_Implicit")
            .with_static()
            .with_parameter("value", class1_ref.clone())
            .returns(string.clone()),
    );
    b.add_method(
        class1,
        MethodDef::new("op_Explicit")
            .with_static()
            .with_parameter("value", class1_ref.clone())
            .returns(int32.clone()),
    );
    b.add_method(
        class1,
        MethodDef::new("op_Explicit")
            .with_static()
            .with_parameter("value", class1_ref.clone())
            .returns(double.clone()),
    );
    b.add_method(
        class1,
        MethodDef::new("op_Addition")
            .with_static()
            .with_parameter("left", class1_ref.clone())
            .with_parameter("right", class1_ref.clone())
            .returns(class1_ref.clone()),
    );
    b.add_method(
        class1,
        MethodDef::new("Finalize")
            .with_override()
            .with_visibility(Visibility::Protected),
    );
    b.add_method(
        class1,
        MethodDef::new("Matrix")
            .with_parameter("cells", double.clone().array_of_rank(2))
            .with_parameter("rows", int32.clone().array().array())
            .returns(int32.clone().pointer()),
    );
    b.add_method(
        class1,
        MethodDef::new("Compute")
            .with_parameter("value", int32.clone())
            .returns(int32.clone())
            .with_attribute("System.Diagnostics.Contracts.PureAttribute"),
    );
    b.add_property(
        class1,
        PropertyDef::new("Item", int32.clone()).with_parameter("n", int32.clone()),
    );
    b.add_property(class1, PropertyDef::new("SomeProperty", string.clone()).read_only());
    b.add_field(class1, FieldDef::new("MyConst", int32.clone()).with_literal());
    b.add_field(class1, FieldDef::new("SomeField", int32.clone()));
    b.add_field(class1, FieldDef::new("ReadonlyField", string.clone()).with_init_only());
    b.add_event(class1, EventDef::new("DoStuff", TypeRef::system("EventHandler")));
    let inner = b.add_nested_type(class1, "Inner", TypeKind::Class);
    b.add_field(inner, FieldDef::new("Depth", int32.clone()));

    let generic1 = b.add_type("TestLibrary1", "Generic1`2", TypeKind::Class);
    b.add_generic_parameters(generic1, &["TA", "TB"]);
    b.add_method(
        generic1,
        MethodDef::new("Junk1")
            .with_generic_parameter("TX")
            .with_parameter("a", TypeRef::method_parameter(0, "TX"))
            .returns(TypeRef::type_parameter(0, "TA")),
    );
    b.add_method(
        generic1,
        MethodDef::new("Combine")
            .with_parameter(
                "pairs",
                TypeRef::external_generic("System.Collections.Generic", "KeyValuePair", 2).instance(
                    vec![TypeRef::type_parameter(0, "TA"), TypeRef::type_parameter(1, "TB")],
                ),
            )
            .with_parameter(
                "other",
                TypeRef::Defined(generic1).instance(vec![int32.clone(), string.clone()]),
            ),
    );
    b.add_property(
        generic1,
        PropertyDef::new("Value", TypeRef::type_parameter(1, "TB")),
    );
    b.add_method(
        generic1,
        MethodDef::new(".ctor")
            .with_parameter("a", TypeRef::type_parameter(0, "TA"))
            .with_parameter("b", TypeRef::type_parameter(1, "TB"))
            .with_parameter(
                "items",
                TypeRef::external_generic("System.Collections.Generic", "IEnumerable", 1)
                    .instance(vec![TypeRef::type_parameter(0, "TA")]),
            )
            .with_parameter("label", string.clone()),
    );
    b.add_method(
        generic1,
        MethodDef::new("op_Addition")
            .with_static()
            .with_parameter(
                "left",
                TypeRef::Defined(generic1).instance(vec![int32.clone(), int32.clone().array()]),
            )
            .with_parameter(
                "right",
                TypeRef::Defined(generic1).instance(vec![
                    TypeRef::type_parameter(0, "TA"),
                    TypeRef::type_parameter(1, "TB"),
                ]),
            )
            .returns(TypeRef::Defined(generic1).instance(vec![
                TypeRef::type_parameter(0, "TA"),
                TypeRef::type_parameter(1, "TB"),
            ])),
    );
    let my_func = b.add_nested_type(generic1, "MyFunc`1", TypeKind::Class);
    b.add_generic_parameters(my_func, &["TD"]);
    let inner1 = b.add_nested_type(generic1, "Inner`1", TypeKind::Class);
    b.add_generic_parameters(inner1, &["TC"]);
    b.add_method(
        inner1,
        MethodDef::new("Junk3")
            .with_parameter("b", TypeRef::type_parameter(1, "TB"))
            .with_parameter("c", TypeRef::type_parameter(2, "TC")),
    );
    b.add_method(
        inner1,
        MethodDef::new("Junk3")
            .with_generic_parameter("TY")
            .with_parameter("c", TypeRef::type_parameter(2, "TC"))
            .with_parameter("b", TypeRef::type_parameter(1, "TB"))
            .with_parameter("a", TypeRef::type_parameter(0, "TA"))
            .with_parameter("y", TypeRef::method_parameter(0, "TY")),
    );
    b.add_method(
        class1,
        MethodDef::new("MakeInner").returns(
            TypeRef::Defined(inner1).instance(vec![int32.clone(), string.clone(), double.clone()]),
        ),
    );

    let flags = b.add_type("TestLibrary1", "FlagsEnum", TypeKind::Enum);
    {
        let def = b.type_mut(flags);
        def.base_type = Some(TypeRef::system("Enum"));
        def.is_sealed = true;
        def.attributes.push(FLAGS_ATTRIBUTE.to_string());
    }
    let flags_ref = TypeRef::Defined(flags);
    for name in ["None", "Alpha", "Beta"] {
        b.add_field(flags, FieldDef::new(name, flags_ref.clone()).with_literal());
    }

    let ithing = b.add_type("TestLibrary1", "IThing", TypeKind::Interface);
    b.type_mut(ithing).is_abstract = true;
    b.add_method(
        ithing,
        MethodDef::new("DoThing")
            .with_abstract()
            .with_parameter("count", int32.clone()),
    );
    b.add_property(
        ithing,
        PropertyDef::new("Name", string.clone()).read_only().with_abstract(),
    );

    let thing = b.add_type("TestLibrary1", "Thing", TypeKind::Class);
    {
        let def = b.type_mut(thing);
        def.base_type = Some(TypeRef::system("Object"));
        def.interfaces.push(TypeRef::Defined(ithing));
    }
    b.add_method(
        thing,
        MethodDef::new("DoThing").with_virtual().with_parameter("count", int32.clone()),
    );
    b.add_property(thing, PropertyDef::new("Name", string.clone()).read_only());
    b.add_method(thing, MethodDef::new("ToString").with_override().returns(string.clone()));

    let base_widget = b.add_type("TestLibrary1", "BaseWidget", TypeKind::Class);
    b.type_mut(base_widget).is_abstract = true;
    b.add_method(base_widget, MethodDef::new("Render").with_virtual());
    let derived_widget = b.add_type("TestLibrary1", "DerivedWidget", TypeKind::Class);
    b.type_mut(derived_widget).base_type = Some(TypeRef::Defined(base_widget));
    b.add_method(derived_widget, MethodDef::new("Render").with_override());
    b.add_method(derived_widget, MethodDef::new("Describe"));

    let extensions = b.add_type("TestLibrary1", "Extensions", TypeKind::Class);
    {
        let def = b.type_mut(extensions);
        def.is_abstract = true;
        def.is_sealed = true;
        def.attributes.push(EXTENSION_ATTRIBUTE.to_string());
    }
    b.add_method(
        extensions,
        MethodDef::new("Twice")
            .with_static()
            .with_parameter("value", class1_ref.clone())
            .returns(class1_ref)
            .with_attribute(EXTENSION_ATTRIBUTE),
    );

    let callback = b.add_type("TestLibrary1", "Callback", TypeKind::Delegate);
    b.type_mut(callback).base_type = Some(TypeRef::system("MulticastDelegate"));
    b.add_method(
        callback,
        MethodDef::new("Invoke")
            .with_virtual()
            .with_parameter("value", string.clone())
            .returns(TypeRef::system("Boolean")),
    );

    let hidden = b.add_type("TestLibrary1.Internal", "Helper", TypeKind::Class);
    b.type_mut(hidden).visibility = Visibility::Internal;

    let in_global = b.add_type("", "InGlobal", TypeKind::Class);
    b.add_method(in_global, MethodDef::new("Run"));

    b.build()
}

/// Build a slice of the framework library that [`test_library`] refers to
pub fn system_library() -> SymbolGraph {
    let mut b = GraphBuilder::new(SYSTEM_LIBRARY_NAME);

    let object = b.add_type("System", "Object", TypeKind::Class);
    let string_ty = b.add_type("System", "String", TypeKind::Class);
    b.type_mut(string_ty).base_type = Some(TypeRef::Defined(object));
    b.type_mut(string_ty).is_sealed = true;
    let string = TypeRef::Defined(string_ty);
    b.add_method(object, MethodDef::constructor());
    b.add_method(object, MethodDef::new("ToString").with_virtual().returns(string.clone()));
    b.add_method(
        object,
        MethodDef::new("Equals")
            .with_virtual()
            .with_parameter("obj", TypeRef::Defined(object))
            .returns(TypeRef::system("Boolean")),
    );

    let value_type = b.add_type("System", "ValueType", TypeKind::Class);
    b.type_mut(value_type).base_type = Some(TypeRef::Defined(object));
    for name in ["Int32", "Double", "Boolean"] {
        let ty = b.add_type("System", name, TypeKind::Struct);
        b.type_mut(ty).base_type = Some(TypeRef::Defined(value_type));
    }

    let exception = b.add_type("System", "Exception", TypeKind::Class);
    b.type_mut(exception).base_type = Some(TypeRef::Defined(object));
    b.add_property(exception, PropertyDef::new("Message", string.clone()).read_only().with_virtual());
    let argument = b.add_type("System", "ArgumentException", TypeKind::Class);
    b.type_mut(argument).base_type = Some(TypeRef::Defined(exception));
    b.add_method(argument, MethodDef::constructor().with_parameter("message", string));

    let delegate = b.add_type("System", "Delegate", TypeKind::Class);
    b.type_mut(delegate).is_abstract = true;
    let multicast = b.add_type("System", "MulticastDelegate", TypeKind::Class);
    b.type_mut(multicast).base_type = Some(TypeRef::Defined(delegate));
    let handler = b.add_type("System", "EventHandler", TypeKind::Delegate);
    b.type_mut(handler).base_type = Some(TypeRef::Defined(multicast));
    b.add_method(
        handler,
        MethodDef::new("Invoke")
            .with_virtual()
            .with_parameter("sender", TypeRef::Defined(object))
            .with_parameter("e", TypeRef::system("EventArgs")),
    );

    b.build()
}

/// Two classes that inherit from each other; only malformed metadata looks like this
pub fn cyclic_library() -> SymbolGraph {
    let mut b = GraphBuilder::new("Cycles");
    let a = b.add_type("Cycles", "A", TypeKind::Class);
    let bb = b.add_type("Cycles", "B", TypeKind::Class);
    b.type_mut(a).base_type = Some(TypeRef::Defined(bb));
    b.type_mut(bb).base_type = Some(TypeRef::Defined(a));
    b.add_method(a, MethodDef::new("Run").with_override());
    b.add_method(bb, MethodDef::new("Run").with_override());
    b.build()
}

/// Parsed [`TEST_LIBRARY_DOCS`]
///
/// # Errors
/// Returns error if the embedded XML no longer parses
pub fn test_library_docs() -> Result<DocSource, DocLoadError> {
    load_xml_docs(TEST_LIBRARY_DOCS)
}

/// Overlay over [`TEST_LIBRARY_DOCS`] in the given inheritdoc mode
///
/// # Errors
/// Returns error if the embedded XML no longer parses
pub fn test_library_overlay(mode: InheritDocMode) -> Result<XmlDocOverlay, DocLoadError> {
    Ok(XmlDocOverlay::from_source(test_library_docs()?, mode))
}

/// Overlay over [`SYSTEM_LIBRARY_DOCS`]
///
/// # Errors
/// Returns error if the embedded XML no longer parses
pub fn system_library_overlay() -> Result<XmlDocOverlay, DocLoadError> {
    let docs = load_xml_docs(SYSTEM_LIBRARY_DOCS)?;
    Ok(XmlDocOverlay::from_source(docs, InheritDocMode::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_has_global_namespace() {
        let graph = test_library();
        assert!(graph.namespace_by_name("").is_some());
        assert!(graph.namespace_by_name("TestLibrary1").is_some());
    }

    #[test]
    fn test_docs_parse() {
        let docs = test_library_docs().unwrap();
        assert!(docs.contains_key("T:TestLibrary1.Class1"));
        assert!(docs.contains_key("M:TestLibrary1.Generic1`2.Junk1``1(``0)"));
    }

    #[test]
    fn test_system_library_builds() {
        let graph = system_library();
        assert!(graph.top_level_type("System", "Object", 0).is_some());
        assert!(graph.top_level_type("System", "ArgumentException", 0).is_some());
    }
}
