use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{take_until, take_till1};
use nom::character::complete::{char, multispace0, line_ending, not_line_ending, i64};
use nom::combinator::{eof, map};
use nom::multi::{many0, separated_list0};
use nom::sequence::{preceded, delimited, tuple};
use serde::de::value::StrDeserializer;
use serde::de::{Error as _, Unexpected};
use serde::{de, forward_to_deserialize_any};

// the lvm.conf / text metadata grammar: `key = value`, `name { ... }`, `# comment`
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Number(i64),
    Array(Vec<ConfigValue>),
}
impl ConfigValue {
    pub fn parse(input: &str) -> IResult<&str, Self> {
        delimited(
            whitespace,
            alt((
                map(i64, ConfigValue::Number),
                map(delimited(char('['), separated_list0(char(','), ConfigValue::parse), preceded(whitespace, char(']'))), ConfigValue::Array),
                map(delimited(char('"'), take_until("\""), char('"')), |x: &str| ConfigValue::String(x.to_owned()))
            )),
            whitespace
        )(input)
    }

    fn unexpected(&self) -> Unexpected<'_> {
        match self {
            ConfigValue::String(s) => Unexpected::Str(s),
            &ConfigValue::Number(n) => Unexpected::Signed(n),
            ConfigValue::Array(_) => Unexpected::Seq,
        }
    }
}

#[derive(Debug)]
pub struct ConfigElements<'a>(pub Vec<ConfigElement<'a>>);
impl<'a> ConfigElements<'a> {
    pub fn parse(input: &'a str) -> IResult<&'a str, Self> {
        map(many0(ConfigElement::parse), ConfigElements)(input)
    }
}

#[derive(Debug)]
pub enum ConfigElement<'a> {
    Group {
        name: &'a str,
        contents: ConfigElements<'a>,
    },
    Value {
        name: &'a str,
        value: ConfigValue,
    },
}
fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_till1(|x| " \r\n\t{}=[]#\",".contains(x))(input)
}
fn comment(input: &str) -> IResult<&str, &str> {
    preceded(multispace0, delimited(char('#'), not_line_ending, alt((line_ending, eof))))(input)
}
fn whitespace(input: &str) -> IResult<&str, ()> {
    let (input, _) = many0(comment)(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, ()))
}
impl<'a> ConfigElement<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            ConfigElement::Group { name, .. } => *name,
            ConfigElement::Value { name, .. } => *name,
        }
    }
    pub fn parse(input: &'a str) -> IResult<&'a str, Self> {
        delimited(
            whitespace,
            alt((
                map(tuple((parse_ident, whitespace, char('='), ConfigValue::parse)), |(name, _, _, value)| ConfigElement::Value { name, value }),

                map(tuple((parse_ident, whitespace, char('{'), ConfigElements::parse, preceded(whitespace, char('}')))), |(name, _, _, contents, _)| ConfigElement::Group { name, contents })
            )),
            whitespace
        )(input)
    }
}

impl<'de, 'a> de::Deserializer<'de> for &'a ConfigElements<'de> {
    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }

    type Error = de::value::Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de> {
        visitor.visit_map(ConfigElementsAccess(self.0.iter().peekable()))
    }
}
pub struct ConfigElementsAccess<'a, 'de>(core::iter::Peekable<core::slice::Iter<'a, ConfigElement<'de>>>);

impl<'de, 'a> de::MapAccess<'de> for ConfigElementsAccess<'a, 'de> {
    type Error = de::value::Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: de::DeserializeSeed<'de> {
        match self.0.peek() {
            None => Ok(None),
            Some(x) => seed.deserialize(StrDeserializer::new(x.name())).map(Some),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: de::DeserializeSeed<'de> {
        match self.0.next() {
            None => Err(de::value::Error::custom("value requested past the end of a group")),
            Some(ConfigElement::Group { contents, .. }) => seed.deserialize(contents),
            Some(ConfigElement::Value { value, .. }) => seed.deserialize(value),
        }
    }
}

// lvm.conf has no boolean literal, flags are written as 0 or 1
impl<'de, 'a> de::Deserializer<'de> for &'a ConfigValue {
    forward_to_deserialize_any! {
        i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }

    type Error = de::value::Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de> {
        match self {
            ConfigValue::String(s) => visitor.visit_str(s),
            &ConfigValue::Number(n) => visitor.visit_i64(n),
            ConfigValue::Array(a) => visitor.visit_seq(ConfigValuesAccess(a.iter())),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de> {
        match self {
            ConfigValue::Number(0) => visitor.visit_bool(false),
            ConfigValue::Number(1) => visitor.visit_bool(true),
            other => Err(de::value::Error::invalid_value(other.unexpected(), &"0 or 1")),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: de::Visitor<'de> {
        visitor.visit_some(self)
    }
}
pub struct ConfigValuesAccess<'a>(core::slice::Iter<'a, ConfigValue>);
impl<'de, 'a> de::SeqAccess<'de> for ConfigValuesAccess<'a> {
    type Error = de::value::Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Self::Error>
    where
        T: de::DeserializeSeed<'de> {
        match self.0.next() {
            None => Ok(None),
            Some(x) => seed.deserialize(x).map(Some),
        }
    }
}
