//! Names and identifiers.

use serde::Serialize;

use super::punct::{Close, Open};
use super::{List, Syntax, Token};

lexical! {
    /// `odataIdentifier`: a simple identifier of up to 128 characters.
    OdataIdentifier,
}

identifier! {
    EntitySetName,
    SingletonEntity,
    EntityTypeName,
    ComplexTypeName,
    TypeDefinitionName,
    EnumerationTypeName,
    EnumerationMember,
    TermName,
    NamespacePart,
    PrimitiveKeyProperty,
    PrimitiveNonKeyProperty,
    PrimitiveColProperty,
    ComplexProperty,
    ComplexColProperty,
    StreamProperty,
    EntityNavigationProperty,
    EntityColNavigationProperty,
    Action,
    ActionImport,
    EntityFunction,
    EntityColFunction,
    ComplexFunction,
    ComplexColFunction,
    PrimitiveFunction,
    PrimitiveColFunction,
    EntityFunctionImport,
    EntityColFunctionImport,
    ComplexFunctionImport,
    ComplexColFunctionImport,
    PrimitiveFunctionImport,
    PrimitiveColFunctionImport,
}

node! {
    /// `namespace = namespacePart *( "." namespacePart )`
    pub struct Namespace<'a> {
        pub parts: List<Token<'a>, NamespacePart<'a>>,
    }

    /// `'Edm.' ( 'Binary' / ... / abstractSpatialTypeName [ concreteSpatialTypeName ] )`
    pub struct PrimitiveTypeName<'a> {
        pub prefix: Token<'a>,
        pub kind: PrimitiveTypeKind<'a>,
    }

    pub enum PrimitiveTypeKind<'a> {
        Named(Token<'a>),
        Spatial(SpatialTypeName<'a>),
    }

    pub struct SpatialTypeName<'a> {
        pub abstract_type: Token<'a>,
        pub concrete_type: Option<Token<'a>>,
    }

    pub enum SingleQualifiedTypeName<'a> {
        EntityType(QualifiedEntityTypeName<'a>),
        ComplexType(QualifiedComplexTypeName<'a>),
        TypeDefinition(QualifiedTypeDefinitionName<'a>),
        EnumType(QualifiedEnumTypeName<'a>),
        Primitive(PrimitiveTypeName<'a>),
    }

    pub enum QualifiedTypeName<'a> {
        Single(SingleQualifiedTypeName<'a>),
        Collection(CollectionTypeName<'a>),
    }

    /// `'Collection' OPEN singleQualifiedTypeName CLOSE`
    pub struct CollectionTypeName<'a> {
        pub keyword: Token<'a>,
        pub open: Open<'a>,
        pub item: SingleQualifiedTypeName<'a>,
        pub close: Close<'a>,
    }

    pub enum PrimitiveProperty<'a> {
        Key(PrimitiveKeyProperty<'a>),
        NonKey(PrimitiveNonKeyProperty<'a>),
    }

    pub enum NavigationProperty<'a> {
        Entity(EntityNavigationProperty<'a>),
        EntityCol(EntityColNavigationProperty<'a>),
    }

    pub enum Function<'a> {
        Entity(EntityFunction<'a>),
        EntityCol(EntityColFunction<'a>),
        Complex(ComplexFunction<'a>),
        ComplexCol(ComplexColFunction<'a>),
        Primitive(PrimitiveFunction<'a>),
        PrimitiveCol(PrimitiveColFunction<'a>),
    }
}

/// `namespace "." name`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Qualified<'a, N> {
    pub namespace: Namespace<'a>,
    pub dot: Token<'a>,
    pub name: N,
}

impl<'a, N: Syntax<'a>> Syntax<'a> for Qualified<'a, N> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.namespace.tokens_into(out);
        out.push(self.dot);
        self.name.tokens_into(out);
    }
}

pub type QualifiedEntityTypeName<'a> = Qualified<'a, EntityTypeName<'a>>;
pub type QualifiedComplexTypeName<'a> = Qualified<'a, ComplexTypeName<'a>>;
pub type QualifiedTypeDefinitionName<'a> = Qualified<'a, TypeDefinitionName<'a>>;
pub type QualifiedEnumTypeName<'a> = Qualified<'a, EnumerationTypeName<'a>>;

impl<'a> Namespace<'a> {
    /// The dotted name, `Org.OData.Core`.
    pub fn name(&self) -> String {
        self.to_source()
    }

    /// The parts of the namespace, without the dots.
    pub fn parts(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.parts.iter().map(|part| part.name())
    }
}

impl<N> Qualified<'_, N> {
    pub fn namespace_name(&self) -> String {
        self.namespace.name()
    }
}

impl<'a> PrimitiveProperty<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            PrimitiveProperty::Key(property) => property.name(),
            PrimitiveProperty::NonKey(property) => property.name(),
        }
    }
}

impl<'a> NavigationProperty<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            NavigationProperty::Entity(property) => property.name(),
            NavigationProperty::EntityCol(property) => property.name(),
        }
    }
}
