//! Literal data values.
//!
//! Numbers, binary data, durations and GUIDs are single tokens; the accessors
//! here interpret their text. Dates, times, strings and the geo literals keep
//! their parts.

use std::borrow::Cow;

use serde::Serialize;
use uuid::Uuid;

use super::names::{EnumerationMember, QualifiedEnumTypeName};
use super::punct::{Close, Comma, Open, Semi, Sign, Squote};
use super::{List, Syntax, Token};

lexical! {
    /// `nullValue = 'null'`
    NullValue,
    /// `booleanValue = "true" / "false"`
    BooleanValue,
    DecimalValue,
    DoubleValue,
    SingleValue,
    GuidValue,
    ByteValue,
    SbyteValue,
    Int16Value,
    Int32Value,
    Int64Value,
    DurationValue,
    BinaryValue,
}

/// `enumMemberValue = int64Value`
pub type EnumMemberValue<'a> = Int64Value<'a>;

node! {
    /// `primitiveLiteral`: a literal as written in a URL.
    pub enum PrimitiveLiteral<'a> {
        Null(NullValue<'a>),
        Boolean(BooleanValue<'a>),
        Guid(GuidValue<'a>),
        Date(DateValue<'a>),
        DateTimeOffset(DateTimeOffsetValue<'a>),
        TimeOfDay(TimeOfDayValue<'a>),
        Decimal(DecimalValue<'a>),
        Double(DoubleValue<'a>),
        Single(SingleValue<'a>),
        SByte(SbyteValue<'a>),
        Byte(ByteValue<'a>),
        Int16(Int16Value<'a>),
        Int32(Int32Value<'a>),
        Int64(Int64Value<'a>),
        String(OdataString<'a>),
        Duration(Duration<'a>),
        Enum(Enum<'a>),
        Binary(Binary<'a>),
        GeographyCollection(GeographyCollection<'a>),
        GeographyLineString(GeographyLineString<'a>),
        GeographyMultiLineString(GeographyMultiLineString<'a>),
        GeographyMultiPoint(GeographyMultiPoint<'a>),
        GeographyMultiPolygon(GeographyMultiPolygon<'a>),
        GeographyPoint(GeographyPoint<'a>),
        GeographyPolygon(GeographyPolygon<'a>),
        GeometryCollection(GeometryCollection<'a>),
        GeometryLineString(GeometryLineString<'a>),
        GeometryMultiLineString(GeometryMultiLineString<'a>),
        GeometryMultiPoint(GeometryMultiPoint<'a>),
        GeometryMultiPolygon(GeometryMultiPolygon<'a>),
        GeometryPoint(GeometryPoint<'a>),
        GeometryPolygon(GeometryPolygon<'a>),
    }

    /// `primitiveValue`: a literal as written in a message body.
    pub enum PrimitiveValue<'a> {
        Boolean(BooleanValue<'a>),
        Guid(GuidValue<'a>),
        Duration(DurationValue<'a>),
        Date(DateValue<'a>),
        DateTimeOffset(DateTimeOffsetValue<'a>),
        TimeOfDay(TimeOfDayValue<'a>),
        Enum(EnumValue<'a>),
        FullCollection(FullCollectionLiteral<'a>),
        FullLineString(FullLineStringLiteral<'a>),
        FullMultiPoint(FullMultiPointLiteral<'a>),
        FullMultiLineString(FullMultiLineStringLiteral<'a>),
        FullMultiPolygon(FullMultiPolygonLiteral<'a>),
        FullPoint(FullPointLiteral<'a>),
        FullPolygon(FullPolygonLiteral<'a>),
        Decimal(DecimalValue<'a>),
        Double(DoubleValue<'a>),
        Single(SingleValue<'a>),
        SByte(SbyteValue<'a>),
        Byte(ByteValue<'a>),
        Int16(Int16Value<'a>),
        Int32(Int32Value<'a>),
        Int64(Int64Value<'a>),
        Binary(BinaryValue<'a>),
    }

    /// `binary = "binary" SQUOTE binaryValue SQUOTE`
    pub struct Binary<'a> {
        pub prefix: Token<'a>,
        pub open: Squote<'a>,
        pub value: BinaryValue<'a>,
        pub close: Squote<'a>,
    }

    /// `string = SQUOTE *( SQUOTE-in-string / pchar-no-SQUOTE ) SQUOTE`
    pub struct OdataString<'a> {
        pub open: Squote<'a>,
        pub content: Token<'a>,
        pub close: Squote<'a>,
    }

    /// `dateValue = year "-" month "-" day`
    pub struct DateValue<'a> {
        pub year: Token<'a>,
        pub first_dash: Token<'a>,
        pub month: Token<'a>,
        pub second_dash: Token<'a>,
        pub day: Token<'a>,
    }

    pub struct DateTimeOffsetValue<'a> {
        pub date: DateValue<'a>,
        pub separator: Token<'a>,
        pub time: TimeOfDayValue<'a>,
        pub zone: TimeZone<'a>,
    }

    /// `"Z" / SIGN hour ":" minute`
    pub enum TimeZone<'a> {
        Utc(Token<'a>),
        Offset(ZoneOffset<'a>),
    }

    pub struct ZoneOffset<'a> {
        pub sign: Sign<'a>,
        pub hour: Token<'a>,
        pub colon: Token<'a>,
        pub minute: Token<'a>,
    }

    /// `timeOfDayValue = hour ":" minute [ ":" second [ "." fractionalSeconds ] ]`
    pub struct TimeOfDayValue<'a> {
        pub hour: Token<'a>,
        pub colon: Token<'a>,
        pub minute: Token<'a>,
        pub seconds: Option<Seconds<'a>>,
    }

    pub struct Seconds<'a> {
        pub colon: Token<'a>,
        pub second: Token<'a>,
        pub fraction: Option<FractionalSeconds<'a>>,
    }

    pub struct FractionalSeconds<'a> {
        pub dot: Token<'a>,
        pub digits: Token<'a>,
    }

    /// `duration = [ "duration" ] SQUOTE durationValue SQUOTE`
    pub struct Duration<'a> {
        pub prefix: Option<Token<'a>>,
        pub open: Squote<'a>,
        pub value: DurationValue<'a>,
        pub close: Squote<'a>,
    }

    /// `enum = [ qualifiedEnumTypeName ] SQUOTE enumValue SQUOTE`
    pub struct Enum<'a> {
        pub type_name: Option<QualifiedEnumTypeName<'a>>,
        pub open: Squote<'a>,
        pub value: EnumValue<'a>,
        pub close: Squote<'a>,
    }

    /// `enumValue = singleEnumValue *( COMMA singleEnumValue )`
    pub struct EnumValue<'a> {
        pub members: List<Comma<'a>, SingleEnumValue<'a>>,
    }

    pub enum SingleEnumValue<'a> {
        Member(EnumerationMember<'a>),
        Value(EnumMemberValue<'a>),
    }

    /// `sridLiteral = "SRID" EQ 1*5DIGIT SEMI`
    pub struct SridLiteral<'a> {
        pub keyword: Token<'a>,
        pub eq: Token<'a>,
        pub srid: Token<'a>,
        pub semi: Semi<'a>,
    }

    /// `collectionLiteral = "Collection(" geoLiteral *( COMMA geoLiteral ) CLOSE`
    pub struct CollectionLiteral<'a> {
        pub keyword: Token<'a>,
        pub items: List<Comma<'a>, GeoLiteral<'a>>,
        pub close: Close<'a>,
    }

    pub enum GeoLiteral<'a> {
        Collection(Box<CollectionLiteral<'a>>),
        LineString(LineStringLiteral<'a>),
        MultiPoint(MultiPointLiteral<'a>),
        MultiLineString(MultiLineStringLiteral<'a>),
        MultiPolygon(MultiPolygonLiteral<'a>),
        Point(PointLiteral<'a>),
        Polygon(PolygonLiteral<'a>),
    }

    /// `lineStringLiteral = "LineString" lineStringData`
    pub struct LineStringLiteral<'a> {
        pub keyword: Token<'a>,
        pub data: LineStringData<'a>,
    }

    /// `lineStringData = OPEN positionLiteral 1*( COMMA positionLiteral ) CLOSE`
    pub struct LineStringData<'a> {
        pub open: Open<'a>,
        pub positions: List<Comma<'a>, PositionLiteral<'a>>,
        pub close: Close<'a>,
    }

    /// `multiLineStringLiteral = "MultiLineString(" [ lineStringData *( COMMA lineStringData ) ] CLOSE`
    pub struct MultiLineStringLiteral<'a> {
        pub keyword: Token<'a>,
        pub items: Option<List<Comma<'a>, LineStringData<'a>>>,
        pub close: Close<'a>,
    }

    /// `multiPointLiteral = "MultiPoint(" [ pointData *( COMMA pointData ) ] CLOSE`
    pub struct MultiPointLiteral<'a> {
        pub keyword: Token<'a>,
        pub items: Option<List<Comma<'a>, PointData<'a>>>,
        pub close: Close<'a>,
    }

    /// `multiPolygonLiteral = "MultiPolygon(" [ polygonData *( COMMA polygonData ) ] CLOSE`
    pub struct MultiPolygonLiteral<'a> {
        pub keyword: Token<'a>,
        pub items: Option<List<Comma<'a>, PolygonData<'a>>>,
        pub close: Close<'a>,
    }

    /// `pointLiteral = "Point" pointData`
    pub struct PointLiteral<'a> {
        pub keyword: Token<'a>,
        pub data: PointData<'a>,
    }

    pub struct PointData<'a> {
        pub open: Open<'a>,
        pub position: PositionLiteral<'a>,
        pub close: Close<'a>,
    }

    /// `positionLiteral = doubleValue SP doubleValue`
    pub struct PositionLiteral<'a> {
        pub longitude: DoubleValue<'a>,
        pub space: Token<'a>,
        pub latitude: DoubleValue<'a>,
    }

    /// `polygonLiteral = "Polygon" polygonData`
    pub struct PolygonLiteral<'a> {
        pub keyword: Token<'a>,
        pub data: PolygonData<'a>,
    }

    pub struct PolygonData<'a> {
        pub open: Open<'a>,
        pub rings: List<Comma<'a>, RingLiteral<'a>>,
        pub close: Close<'a>,
    }

    pub struct RingLiteral<'a> {
        pub open: Open<'a>,
        pub positions: List<Comma<'a>, PositionLiteral<'a>>,
        pub close: Close<'a>,
    }
}

/// `sridLiteral <shape>`: a geo literal with its spatial reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullLiteral<'a, T> {
    pub srid: SridLiteral<'a>,
    pub literal: T,
}

impl<'a, T: Syntax<'a>> Syntax<'a> for FullLiteral<'a, T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.srid.tokens_into(out);
        self.literal.tokens_into(out);
    }
}

pub type FullCollectionLiteral<'a> = FullLiteral<'a, CollectionLiteral<'a>>;
pub type FullLineStringLiteral<'a> = FullLiteral<'a, LineStringLiteral<'a>>;
pub type FullMultiLineStringLiteral<'a> = FullLiteral<'a, MultiLineStringLiteral<'a>>;
pub type FullMultiPointLiteral<'a> = FullLiteral<'a, MultiPointLiteral<'a>>;
pub type FullMultiPolygonLiteral<'a> = FullLiteral<'a, MultiPolygonLiteral<'a>>;
pub type FullPointLiteral<'a> = FullLiteral<'a, PointLiteral<'a>>;
pub type FullPolygonLiteral<'a> = FullLiteral<'a, PolygonLiteral<'a>>;

/// `geographyPrefix SQUOTE <full literal> SQUOTE` and its geometry twin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialLiteral<'a, T> {
    pub prefix: Token<'a>,
    pub open: Squote<'a>,
    pub value: T,
    pub close: Squote<'a>,
}

impl<'a, T: Syntax<'a>> Syntax<'a> for SpatialLiteral<'a, T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        out.push(self.prefix);
        self.open.tokens_into(out);
        self.value.tokens_into(out);
        self.close.tokens_into(out);
    }
}

pub type GeographyCollection<'a> = SpatialLiteral<'a, FullCollectionLiteral<'a>>;
pub type GeographyLineString<'a> = SpatialLiteral<'a, FullLineStringLiteral<'a>>;
pub type GeographyMultiLineString<'a> = SpatialLiteral<'a, FullMultiLineStringLiteral<'a>>;
pub type GeographyMultiPoint<'a> = SpatialLiteral<'a, FullMultiPointLiteral<'a>>;
pub type GeographyMultiPolygon<'a> = SpatialLiteral<'a, FullMultiPolygonLiteral<'a>>;
pub type GeographyPoint<'a> = SpatialLiteral<'a, FullPointLiteral<'a>>;
pub type GeographyPolygon<'a> = SpatialLiteral<'a, FullPolygonLiteral<'a>>;
pub type GeometryCollection<'a> = SpatialLiteral<'a, FullCollectionLiteral<'a>>;
pub type GeometryLineString<'a> = SpatialLiteral<'a, FullLineStringLiteral<'a>>;
pub type GeometryMultiLineString<'a> = SpatialLiteral<'a, FullMultiLineStringLiteral<'a>>;
pub type GeometryMultiPoint<'a> = SpatialLiteral<'a, FullMultiPointLiteral<'a>>;
pub type GeometryMultiPolygon<'a> = SpatialLiteral<'a, FullMultiPolygonLiteral<'a>>;
pub type GeometryPoint<'a> = SpatialLiteral<'a, FullPointLiteral<'a>>;
pub type GeometryPolygon<'a> = SpatialLiteral<'a, FullPolygonLiteral<'a>>;

// A leading `%2B` is the encoded spelling of `+`.
fn decode_sign(text: &str) -> Cow<'_, str> {
    match text.get(..3) {
        Some(encoded) if encoded.eq_ignore_ascii_case("%2B") => Cow::Owned(format!("+{}", &text[3..])),
        _ => Cow::Borrowed(text),
    }
}

fn parse_float(text: &str) -> Option<f64> {
    match text {
        "NaN" => Some(f64::NAN),
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        _ => decode_sign(text).parse().ok(),
    }
}

impl BooleanValue<'_> {
    pub fn value(&self) -> bool {
        self.as_str().eq_ignore_ascii_case("true")
    }
}

impl DecimalValue<'_> {
    /// The value as a binary float. Values out of range become infinite.
    pub fn to_f64(&self) -> Option<f64> {
        parse_float(self.as_str())
    }
}

impl DoubleValue<'_> {
    pub fn to_f64(&self) -> Option<f64> {
        parse_float(self.as_str())
    }
}

impl SingleValue<'_> {
    pub fn to_f32(&self) -> Option<f32> {
        parse_float(self.as_str()).map(|value| value as f32)
    }
}

macro_rules! integer_value {
    ($($name:ident => $int:ty),* $(,)?) => {
        $(
            impl $name<'_> {
                /// The value, `None` when it is out of range for the type.
                pub fn value(&self) -> Option<$int> {
                    decode_sign(self.as_str()).parse().ok()
                }
            }
        )*
    };
}

integer_value! {
    ByteValue => u8,
    SbyteValue => i8,
    Int16Value => i16,
    Int32Value => i32,
    Int64Value => i64,
}

impl GuidValue<'_> {
    pub fn to_uuid(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(self.as_str())
    }
}

impl OdataString<'_> {
    /// The string with doubled quotes collapsed. Percent-encoded characters
    /// other than the quotes are left as they are.
    pub fn value(&self) -> String {
        let mut value = String::new();
        let mut rest = self.content.text();
        while let Some(c) = rest.chars().next() {
            if let Some(after) = strip_squote(rest) {
                value.push('\'');
                rest = strip_squote(after).unwrap_or(after);
            } else {
                value.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
        value
    }
}

fn strip_squote(text: &str) -> Option<&str> {
    if let Some(rest) = text.strip_prefix('\'') {
        return Some(rest);
    }
    match text.get(..3) {
        Some(encoded) if encoded.eq_ignore_ascii_case("%27") => Some(&text[3..]),
        _ => None,
    }
}

impl DateValue<'_> {
    pub fn year(&self) -> Option<i32> {
        self.year.text().parse().ok()
    }

    pub fn month(&self) -> Option<u32> {
        self.month.text().parse().ok()
    }

    pub fn day(&self) -> Option<u32> {
        self.day.text().parse().ok()
    }
}

impl TimeOfDayValue<'_> {
    /// Hours, minutes and seconds; seconds default to zero.
    pub fn hms(&self) -> Option<(u32, u32, u32)> {
        let second = match &self.seconds {
            Some(seconds) => seconds.second.text().parse().ok()?,
            None => 0,
        };
        Some((self.hour.text().parse().ok()?, self.minute.text().parse().ok()?, second))
    }
}

impl ZoneOffset<'_> {
    /// The offset from UTC in minutes.
    pub fn minutes(&self) -> Option<i32> {
        let hour: i32 = self.hour.text().parse().ok()?;
        let minute: i32 = self.minute.text().parse().ok()?;
        let minutes = hour * 60 + minute;
        Some(if self.sign.is_negative() { -minutes } else { minutes })
    }
}

impl<'a> EnumValue<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &SingleEnumValue<'a>> {
        self.members.iter()
    }
}

impl SridLiteral<'_> {
    pub fn value(&self) -> Option<u32> {
        self.srid.text().parse().ok()
    }
}
