//! Names and identifiers (section 6).
//!
//! Most rules here are an `odataIdentifier` naming a different kind of model
//! element. Without a schema they all match the same text: which one a parse
//! reports is decided by the position of the name in the enclosing rule.

use nom::branch::alt;
use nom::combinator::{map, not, opt, peek};
use nom::sequence::{pair, terminated, tuple};

use crate::combinator::{class, lexeme, lit, many, repeat, traced, PResult};
use crate::cst::names::*;
use crate::cst::{Item, List, Token};
use crate::input::Input;

use super::*;

//* ;------------------------------------------------------------------------------
//* ; 6. Names and identifiers
//* ;------------------------------------------------------------------------------
//*
//* singleQualifiedTypeName = qualifiedEntityTypeName
//*                         / qualifiedComplexTypeName
//*                         / qualifiedTypeDefinitionName
//*                         / qualifiedEnumTypeName
//*                         / primitiveTypeName
//
// `primitiveTypeName` goes first: `Edm.String` would otherwise be read as an
// entity type `String` in namespace `Edm`.
rule! {
    pub fn singleQualifiedTypeName<'a>(input) -> SingleQualifiedTypeName<'a> {
        alt((
            map(primitiveTypeName, SingleQualifiedTypeName::Primitive),
            map(qualifiedEntityTypeName, SingleQualifiedTypeName::EntityType),
            map(qualifiedComplexTypeName, SingleQualifiedTypeName::ComplexType),
            map(qualifiedTypeDefinitionName, SingleQualifiedTypeName::TypeDefinition),
            map(qualifiedEnumTypeName, SingleQualifiedTypeName::EnumType),
        ))(input)
    }
}

//* qualifiedTypeName = singleQualifiedTypeName
//*                   / 'Collection' OPEN singleQualifiedTypeName CLOSE
//
// Tried the other way round so that `Collection(...)` is not cut short at a
// type named `Collection` in some namespace.
rule! {
    pub fn qualifiedTypeName<'a>(input) -> QualifiedTypeName<'a> {
        alt((
            map(collectionTypeName, QualifiedTypeName::Collection),
            map(singleQualifiedTypeName, QualifiedTypeName::Single),
        ))(input)
    }
}

rule! {
    pub fn collectionTypeName<'a>(input) -> CollectionTypeName<'a> {
        let (input, (keyword, open, item, close)) =
            tuple((lit("Collection"), OPEN, singleQualifiedTypeName, CLOSE))(input)?;
        Ok((input, CollectionTypeName { keyword, open, item, close }))
    }
}

//* qualifiedEntityTypeName     = namespace "." entityTypeName
rule! {
    pub fn qualifiedEntityTypeName<'a>(input) -> QualifiedEntityTypeName<'a> {
        qualified(entityTypeName)(input)
    }
}

//* qualifiedComplexTypeName    = namespace "." complexTypeName
rule! {
    pub fn qualifiedComplexTypeName<'a>(input) -> QualifiedComplexTypeName<'a> {
        qualified(complexTypeName)(input)
    }
}

//* qualifiedTypeDefinitionName = namespace "." typeDefinitionName
rule! {
    pub fn qualifiedTypeDefinitionName<'a>(input) -> QualifiedTypeDefinitionName<'a> {
        qualified(typeDefinitionName)(input)
    }
}

//* qualifiedEnumTypeName       = namespace "." enumerationTypeName
rule! {
    pub fn qualifiedEnumTypeName<'a>(input) -> QualifiedEnumTypeName<'a> {
        qualified(enumerationTypeName)(input)
    }
}

/// `namespace "." name`
pub fn qualified<'a, N>(
    name: impl Fn(Input<'a>) -> PResult<'a, N>,
) -> impl Fn(Input<'a>) -> PResult<'a, Qualified<'a, N>> {
    move |input: Input<'a>| {
        let (input, (namespace, dot, name)) = tuple((namespace, lit("."), &name))(input)?;
        Ok((input, Qualified { namespace, dot, name }))
    }
}

//* ; an alias is just a single-part namespace
//* namespace     = namespacePart *( "." namespacePart )
//
// The namespace is always followed by `"." name`, so a part is only taken when
// another dot follows it; a greedy match would swallow the name.
rule! {
    pub fn namespace<'a>(input) -> Namespace<'a> {
        let (input, first) = namespacePart(input)?;
        let (input, rest) = many(map(
            terminated(pair(lit("."), namespacePart), peek(lit("."))),
            |(separator, value)| Item { separator, value },
        ))(input)?;
        Ok((input, Namespace { parts: List { first, rest } }))
    }
}

macro_rules! identifier_rules {
    ($( $rule:ident => $node:ident ),* $(,)?) => {
        $(
            pub fn $rule(input: Input<'_>) -> PResult<'_, $node<'_>> {
                traced(stringify!($rule), input, |input| {
                    let (input, identifier) = odataIdentifier(input)?;
                    Ok((input, $node { identifier }))
                })
            }
        )*
    };
}

//* namespacePart = odataIdentifier
//*
//* entitySetName       = odataIdentifier
//* singletonEntity     = odataIdentifier
//* entityTypeName      = odataIdentifier
//* complexTypeName     = odataIdentifier
//* typeDefinitionName  = odataIdentifier
//* enumerationTypeName = odataIdentifier
//* enumerationMember   = odataIdentifier
//* termName            = odataIdentifier
identifier_rules! {
    namespacePart => NamespacePart,
    entitySetName => EntitySetName,
    singletonEntity => SingletonEntity,
    entityTypeName => EntityTypeName,
    complexTypeName => ComplexTypeName,
    typeDefinitionName => TypeDefinitionName,
    enumerationTypeName => EnumerationTypeName,
    enumerationMember => EnumerationMember,
    termName => TermName,
}

//* ; Note: this pattern is overly restrictive, the normative definition is type TSimpleIdentifier in OData EDM XML Schema
//* odataIdentifier             = identifierLeadingCharacter *127identifierCharacter
rule! {
    pub fn odataIdentifier<'a>(input) -> OdataIdentifier<'a> {
        let (input, text) = lexeme(pair(
            identifierLeadingCharacter,
            repeat(0, Some(127), identifierCharacter),
        ))(input)?;
        Ok((input, OdataIdentifier { text }))
    }
}

//* identifierLeadingCharacter  = ALPHA / "_"         ; plus Unicode characters from the categories L or Nl
pub fn identifierLeadingCharacter(input: Input<'_>) -> PResult<'_, Token<'_>> {
    class(|c| c == '_' || c.is_alphabetic())(input)
}

//* identifierCharacter         = ALPHA / "_" / DIGIT ; plus Unicode characters from the categories L, Nl, Nd, Mn, Mc, Pc, or Cf
pub fn identifierCharacter(input: Input<'_>) -> PResult<'_, Token<'_>> {
    class(|c| c == '_' || c.is_alphanumeric())(input)
}

//* primitiveTypeName = 'Edm.' ( 'Binary'
//*                            / 'Boolean'
//*                            / 'Byte'
//*                            / 'Date'
//*                            / 'DateTimeOffset'
//*                            / 'Decimal'
//*                            / 'Double'
//*                            / 'Duration'
//*                            / 'Guid'
//*                            / 'Int16'
//*                            / 'Int32'
//*                            / 'Int64'
//*                            / 'SByte'
//*                            / 'Single'
//*                            / 'Stream'
//*                            / 'String'
//*                            / 'TimeOfDay'
//*                            / abstractSpatialTypeName [ concreteSpatialTypeName ]
//*                            )
//
// `DateTimeOffset` is tried before its prefix `Date`, and the name must end at
// an identifier boundary (`Edm.Int32x` is not a primitive type).
rule! {
    pub fn primitiveTypeName<'a>(input) -> PrimitiveTypeName<'a> {
        let (input, prefix) = lit("Edm.")(input)?;
        let (input, kind) = alt((
            map(
                alt((
                    lit("Binary"),
                    lit("Boolean"),
                    lit("Byte"),
                    lit("DateTimeOffset"),
                    lit("Date"),
                    lit("Decimal"),
                    lit("Double"),
                    lit("Duration"),
                    lit("Guid"),
                    lit("Int16"),
                    lit("Int32"),
                    lit("Int64"),
                    lit("SByte"),
                    lit("Single"),
                    lit("Stream"),
                    lit("String"),
                    lit("TimeOfDay"),
                )),
                PrimitiveTypeKind::Named,
            ),
            map(
                pair(abstractSpatialTypeName, opt(concreteSpatialTypeName)),
                |(abstract_type, concrete_type)| {
                    PrimitiveTypeKind::Spatial(SpatialTypeName {
                        abstract_type,
                        concrete_type,
                    })
                },
            ),
        ))(input)?;
        let (input, _) = not(identifierCharacter)(input)?;
        Ok((input, PrimitiveTypeName { prefix, kind }))
    }
}

//* abstractSpatialTypeName = 'Geography'
//*                         / 'Geometry'
pub fn abstractSpatialTypeName(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((lit("Geography"), lit("Geometry")))(input)
}

//* concreteSpatialTypeName = 'Collection'
//*                         / 'LineString'
//*                         / 'MultiLineString'
//*                         / 'MultiPoint'
//*                         / 'MultiPolygon'
//*                         / 'Point'
//*                         / 'Polygon'
pub fn concreteSpatialTypeName(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((
        lit("Collection"),
        lit("LineString"),
        lit("MultiLineString"),
        lit("MultiPoint"),
        lit("MultiPolygon"),
        lit("Point"),
        lit("Polygon"),
    ))(input)
}

//* primitiveProperty       = primitiveKeyProperty / primitiveNonKeyProperty
//
// Only the first alternative can ever match; key or not is a schema question.
rule! {
    pub fn primitiveProperty<'a>(input) -> PrimitiveProperty<'a> {
        alt((
            map(primitiveKeyProperty, PrimitiveProperty::Key),
            map(primitiveNonKeyProperty, PrimitiveProperty::NonKey),
        ))(input)
    }
}

//* primitiveKeyProperty    = odataIdentifier
//* primitiveNonKeyProperty = odataIdentifier
//* primitiveColProperty    = odataIdentifier
//* complexProperty         = odataIdentifier
//* complexColProperty      = odataIdentifier
//* streamProperty          = odataIdentifier
identifier_rules! {
    primitiveKeyProperty => PrimitiveKeyProperty,
    primitiveNonKeyProperty => PrimitiveNonKeyProperty,
    primitiveColProperty => PrimitiveColProperty,
    complexProperty => ComplexProperty,
    complexColProperty => ComplexColProperty,
    streamProperty => StreamProperty,
}

//* navigationProperty          = entityNavigationProperty / entityColNavigationProperty
rule! {
    pub fn navigationProperty<'a>(input) -> NavigationProperty<'a> {
        alt((
            map(entityNavigationProperty, NavigationProperty::Entity),
            map(entityColNavigationProperty, NavigationProperty::EntityCol),
        ))(input)
    }
}

//* entityNavigationProperty    = odataIdentifier
//* entityColNavigationProperty = odataIdentifier
//*
//* action       = odataIdentifier
//* actionImport = odataIdentifier
identifier_rules! {
    entityNavigationProperty => EntityNavigationProperty,
    entityColNavigationProperty => EntityColNavigationProperty,
    action => Action,
    actionImport => ActionImport,
}

//* function = entityFunction
//*          / entityColFunction
//*          / complexFunction
//*          / complexColFunction
//*          / primitiveFunction
//*          / primitiveColFunction
rule! {
    pub fn function<'a>(input) -> Function<'a> {
        alt((
            map(entityFunction, Function::Entity),
            map(entityColFunction, Function::EntityCol),
            map(complexFunction, Function::Complex),
            map(complexColFunction, Function::ComplexCol),
            map(primitiveFunction, Function::Primitive),
            map(primitiveColFunction, Function::PrimitiveCol),
        ))(input)
    }
}

//* entityFunction       = odataIdentifier
//* entityColFunction    = odataIdentifier
//* complexFunction      = odataIdentifier
//* complexColFunction   = odataIdentifier
//* primitiveFunction    = odataIdentifier
//* primitiveColFunction = odataIdentifier
//*
//* entityFunctionImport       = odataIdentifier
//* entityColFunctionImport    = odataIdentifier
//* complexFunctionImport      = odataIdentifier
//* complexColFunctionImport   = odataIdentifier
//* primitiveFunctionImport    = odataIdentifier
//* primitiveColFunctionImport = odataIdentifier
identifier_rules! {
    entityFunction => EntityFunction,
    entityColFunction => EntityColFunction,
    complexFunction => ComplexFunction,
    complexColFunction => ComplexColFunction,
    primitiveFunction => PrimitiveFunction,
    primitiveColFunction => PrimitiveColFunction,
    entityFunctionImport => EntityFunctionImport,
    entityColFunctionImport => EntityColFunctionImport,
    complexFunctionImport => ComplexFunctionImport,
    complexColFunctionImport => ComplexColFunctionImport,
    primitiveFunctionImport => PrimitiveFunctionImport,
    primitiveColFunctionImport => PrimitiveColFunctionImport,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cst::Syntax;

    #[test]
    fn entity_set_name_consumes_the_identifier() {
        let (rest, name) = entitySetName(Input::new("users")).unwrap();
        assert_eq!(name.name(), "users");
        assert_eq!(rest.offset(), 5);
        assert!(rest.is_empty());
    }

    #[test]
    fn identifier_needs_a_leading_character() {
        assert!(odataIdentifier(Input::new("")).is_err());
        assert!(odataIdentifier(Input::new("1abc")).is_err());

        let (rest, name) = odataIdentifier(Input::new("_a1b2-c")).unwrap();
        assert_eq!(name.as_str(), "_a1b2");
        assert_eq!(rest.as_str(), "-c");
    }

    #[test]
    fn identifier_stops_after_128_characters() {
        let text = "a".repeat(130);
        let (rest, name) = odataIdentifier(Input::new(&text)).unwrap();
        assert_eq!(name.as_str().len(), 128);
        assert_eq!(rest.len(), 2);
    }

    #[test]
    fn namespace_leaves_the_qualified_name() {
        let (rest, name) = qualifiedEntityTypeName(Input::new("Org.OData.Core.Person")).unwrap();
        assert_eq!(name.namespace_name(), "Org.OData.Core");
        assert_eq!(name.namespace.parts().collect::<Vec<_>>(), vec!["Org", "OData", "Core"]);
        assert_eq!(name.name.name(), "Person");
        assert!(rest.is_empty());
        assert_eq!(name.to_source(), "Org.OData.Core.Person");
    }

    #[test]
    fn primitive_types_take_precedence() {
        let (_, name) = singleQualifiedTypeName(Input::new("Edm.DateTimeOffset")).unwrap();
        match name {
            SingleQualifiedTypeName::Primitive(PrimitiveTypeName {
                kind: PrimitiveTypeKind::Named(token),
                ..
            }) => assert_eq!(token.text(), "DateTimeOffset"),
            other => panic!("unexpected {other:?}"),
        }

        let (_, name) = singleQualifiedTypeName(Input::new("Edm.Int32x")).unwrap();
        assert!(matches!(name, SingleQualifiedTypeName::EntityType(_)));
    }

    #[test]
    fn spatial_types_have_an_optional_concrete_part() {
        let (rest, name) = primitiveTypeName(Input::new("Edm.GeographyPoint")).unwrap();
        assert!(rest.is_empty());
        match name.kind {
            PrimitiveTypeKind::Spatial(spatial) => {
                assert_eq!(spatial.abstract_type.text(), "Geography");
                assert_eq!(spatial.concrete_type.map(|token| token.text()), Some("Point"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn collection_of_types() {
        let (rest, name) = qualifiedTypeName(Input::new("Collection(Edm.String)")).unwrap();
        assert!(rest.is_empty());
        assert!(matches!(name, QualifiedTypeName::Collection(_)));

        let (_, name) = qualifiedTypeName(Input::new("Collection.Thing")).unwrap();
        assert!(matches!(name, QualifiedTypeName::Single(_)));
    }

    #[test]
    fn property_kinds_resolve_to_the_first_alternative() {
        let (_, property) = primitiveProperty(Input::new("Name")).unwrap();
        assert!(matches!(property, PrimitiveProperty::Key(_)));
        let (_, function) = function(Input::new("GetAll")).unwrap();
        assert!(matches!(function, Function::Entity(_)));
    }
}
