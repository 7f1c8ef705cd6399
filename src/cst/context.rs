//! Context URL fragments (section 3), the part after `$metadata#`.

use super::names::{
    ComplexColProperty, ComplexProperty, EntitySetName, NavigationProperty, PrimitiveColProperty,
    PrimitiveProperty, QualifiedEntityTypeName, QualifiedTypeName, SingletonEntity,
};
use super::punct::{Close, Comma, Open, Star};
use super::query::{AllOperationsInSchema, QualifiedActionName, QualifiedFunctionName, SelectPath};
use super::resource::{ComplexCast, EntityCast, KeyPredicate};
use super::{Chain, List, Prefixed, Suffixed, Token};

/// `qualifiedTypeName [ selectList ]`
pub type TypeContext<'a> = Chain<QualifiedTypeName<'a>, SelectList<'a>>;

node! {
    /// `"#" contextFragment`
    pub struct Context<'a> {
        pub hash: Token<'a>,
        pub fragment: ContextFragment<'a>,
    }

    pub enum ContextFragment<'a> {
        /// `'Collection($ref)'`
        CollectionRef(Token<'a>),
        /// `'$ref'`
        Ref(Token<'a>),
        /// `'Collection(Edm.EntityType)'`
        CollectionEntityType(Token<'a>),
        /// `'Collection(Edm.ComplexType)'`
        CollectionComplexType(Token<'a>),
        Singleton(SingletonContext<'a>),
        Type(TypeContext<'a>),
        /// `entitySet ( '/$deletedEntity' / '/$link' / '/$deletedLink' )`
        Delta(DeltaContext<'a>),
        Property(PropertyContext<'a>),
        EntitySet(EntitySetContext<'a>),
    }

    /// `singletonEntity [ navigation *( containmentNavigation ) [ "/" qualifiedEntityTypeName ] ] [ selectList ]`
    pub struct SingletonContext<'a> {
        pub singleton: SingletonEntity<'a>,
        pub path: Option<SingletonPath<'a>>,
        pub select: Option<SelectList<'a>>,
    }

    pub struct SingletonPath<'a> {
        pub navigation: Navigation<'a>,
        pub containment: Vec<ContainmentNavigation<'a>>,
        pub cast: Option<EntityCast<'a>>,
    }

    pub struct DeltaContext<'a> {
        pub entity_set: EntitySet<'a>,
        pub kind: Token<'a>,
    }

    /// `entitySet keyPredicate "/" contextPropertyPath [ selectList ]`
    pub struct PropertyContext<'a> {
        pub entity_set: EntitySet<'a>,
        pub key: KeyPredicate<'a>,
        pub slash: Token<'a>,
        pub property: ContextPropertyPath<'a>,
        pub select: Option<SelectList<'a>>,
    }

    /// `entitySet [ selectList ] [ '/$entity' / '/$delta' ]`
    pub struct EntitySetContext<'a> {
        pub entity_set: EntitySet<'a>,
        pub select: Option<SelectList<'a>>,
        pub suffix: Option<Token<'a>>,
    }

    /// `entitySetName *( containmentNavigation ) [ "/" qualifiedEntityTypeName ]`
    pub struct EntitySet<'a> {
        pub name: EntitySetName<'a>,
        pub containment: Vec<ContainmentNavigation<'a>>,
        pub cast: Option<EntityCast<'a>>,
    }

    /// `keyPredicate [ "/" qualifiedEntityTypeName ] navigation`
    pub struct ContainmentNavigation<'a> {
        pub key: KeyPredicate<'a>,
        pub cast: Option<EntityCast<'a>>,
        pub navigation: Navigation<'a>,
    }

    /// `*( "/" complexProperty [ "/" qualifiedComplexTypeName ] ) "/" navigationProperty`
    pub struct Navigation<'a> {
        pub complex: Vec<ComplexStep<'a>>,
        pub slash: Token<'a>,
        pub property: NavigationProperty<'a>,
    }

    pub struct ComplexStep<'a> {
        pub property: Prefixed<'a, ComplexProperty<'a>>,
        pub cast: Option<ComplexCast<'a>>,
    }

    pub struct SelectList<'a> {
        pub open: Open<'a>,
        pub items: List<Comma<'a>, SelectListItem<'a>>,
        pub close: Close<'a>,
    }

    pub enum SelectListItem<'a> {
        /// All structural properties.
        Star(Star<'a>),
        AllOperations(AllOperationsInSchema<'a>),
        Path(SelectListPathItem<'a>),
    }

    pub struct SelectListPathItem<'a> {
        pub type_cast: Option<Suffixed<'a, QualifiedEntityTypeName<'a>>>,
        pub target: SelectListTarget<'a>,
    }

    pub enum SelectListTarget<'a> {
        Action(QualifiedActionName<'a>),
        Function(QualifiedFunctionName<'a>),
        Property(SelectListProperty<'a>),
    }

    pub enum SelectListProperty<'a> {
        Primitive(PrimitiveProperty<'a>),
        PrimitiveCol(PrimitiveColProperty<'a>),
        Navigation(NavigationSelect<'a>),
        Path(Chain<SelectPath<'a>, Prefixed<'a, Box<SelectListProperty<'a>>>>),
    }

    /// `navigationProperty [ "+" ] [ selectList ]`
    pub struct NavigationSelect<'a> {
        pub property: NavigationProperty<'a>,
        pub plus: Option<Token<'a>>,
        pub select: Option<Box<SelectList<'a>>>,
    }

    pub enum ContextPropertyPath<'a> {
        Primitive(PrimitiveProperty<'a>),
        PrimitiveCol(PrimitiveColProperty<'a>),
        ComplexCol(ComplexColProperty<'a>),
        Complex(Chain<ComplexProperty<'a>, ContextPropertyTail<'a>>),
    }

    /// `[ "/" qualifiedComplexTypeName ] "/" contextPropertyPath`
    pub struct ContextPropertyTail<'a> {
        pub cast: Option<ComplexCast<'a>>,
        pub slash: Token<'a>,
        pub path: Box<ContextPropertyPath<'a>>,
    }
}

impl<'a> SelectList<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &SelectListItem<'a>> {
        self.items.iter()
    }
}

impl<'a> EntitySet<'a> {
    /// Names of the navigation properties followed after the entity set.
    pub fn navigation_names(&self) -> Vec<&'a str> {
        self.containment
            .iter()
            .map(|step| step.navigation.property.name())
            .collect()
    }
}
