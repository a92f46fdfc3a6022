/*!

Helpers to read `ConfigurationValue`s, as produced by the [config_parser](crate::config_parser).

Builders of strategies and topologies walk the attributes of their object with [match_object!] and convert each value with the `as_*` methods, which fail with an `IllFormedConfiguration` error instead of panicking.

*/

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::{rngs::StdRng,SeedableRng};

use crate::config_parser::{self,ConfigurationValue,Token};
use crate::error;
use crate::error::*;

/// match arms against the keys of an object
/// first argument, `$cv:expr`, is the ConfigurationValue expected to be the object
/// second argument, `$name:literal`, is the name the Object should have.
/// third argument, `$valueid:ident`, is the variable name capturing the value in the object's elements
///    and can be used in the arms
/// the remaining arguments are the arms of the match.
/// Unknown keys make the enclosing function return an `IllFormedConfiguration` error.
#[macro_export]
macro_rules! match_object{
	($cv:expr, $name:literal, $valueid:ident ) => {{
		$crate::match_object!($cv,[$name],$valueid,)
	}};
	($cv:expr, $name:literal, $valueid:ident, $($arm:tt)* ) => {{
		$crate::match_object!($cv,[$name],$valueid,$($arm)*)
	}};
	($cv:expr, $names:expr, $valueid:ident, $($arm:tt)* ) => {{
		if let &$crate::config_parser::ConfigurationValue::Object(ref cv_name, ref cv_pairs) = $cv
		{
			if !$names.iter().any(|&x|x==cv_name)
			{
				return Err($crate::error!(ill_formed_configuration,$cv.clone()).with_message(format!("Expected a `{}` object, not `{}`",$names[0],cv_name)));
			}
			for &(ref name,ref $valueid) in cv_pairs
			{
				match AsRef::<str>::as_ref(&name)
				{
					$( $arm )*
					"legend_name" => (),
					_ => return Err($crate::error!(ill_formed_configuration,$cv.clone()).with_message(format!("Nothing to do with field {} in {}",name,$names[0]))),
				}
			}
		}
		else
		{
			return Err($crate::error!(ill_formed_configuration,$cv.clone()).with_message(format!("Trying to create a {} from a non-Object",$names[0])));
		}
	}};
}
impl ConfigurationValue
{
	pub fn as_bool(&self) -> Result<bool,Error>
	{
		match self
		{
			&ConfigurationValue::True => Ok(true),
			&ConfigurationValue::False => Ok(false),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_str(&self) -> Result<&str,Error>
	{
		match self
		{
			&ConfigurationValue::Literal(ref s) => Ok(s),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_usize(&self) -> Result<usize,Error>
	{
		match self
		{
			&ConfigurationValue::Number(x) =>{
				// Negative numbers saturate to 0, so they are caught here too.
				let res =  x as usize;
				let y = res as f64;
				let tolerance = 1e-5;
				if x-y > tolerance || x-y < -tolerance {
					Err(error!(ill_formed_configuration, self.clone()))
				} else {
					Ok( res )
				}
			},
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_i32(&self) -> Result<i32,Error>
	{
		match self
		{
			&ConfigurationValue::Number(x) =>{
				let res =  x as i32;
				let y = res as f64;
				let tolerance = 1e-5;
				if x-y > tolerance || x-y < -tolerance {
					Err(error!(ill_formed_configuration, self.clone()))
				} else {
					Ok( res )
				}
			},
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_array(&self) -> Result<&Vec<ConfigurationValue>,Error>
	{
		match self
		{
			&ConfigurationValue::Array(ref x) => Ok(x),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	/// Read an array of non-negative integers, as in `ordered_vnets: [0,2]`.
	pub fn as_usize_list(&self) -> Result<Vec<usize>,Error>
	{
		self.as_array()?.iter().map(|v|v.as_usize()).collect()
	}
	/// Build a generator seeded by this number.
	pub fn as_rng(&self) -> Result<StdRng,Error>
	{
		match self
		{
			&ConfigurationValue::Number(x) =>{
				let seed =  x as u64;
				let y = seed as f64;
				let tolerance = 1e-5;
				if x-y > tolerance || x-y < -tolerance {
					Err(error!(ill_formed_configuration, self.clone()))
				} else {
					Ok( StdRng::seed_from_u64(seed) )
				}
			},
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	/// Build a generic IllFormedConfiguration error from this ConfigurationValue.
	pub fn ill(&self,message:&str) -> Error
	{
		error!(ill_formed_configuration,self.clone()).with_message(message.to_string())
	}
	/// The name of an object, or None for any other value.
	pub fn object_name(&self) -> Option<&str>
	{
		match self
		{
			&ConfigurationValue::Object(ref name,_) => Some(name),
			_ => None,
		}
	}
}

/// Parse a configuration from its text.
pub fn parse_configuration(source:&str) -> Result<ConfigurationValue,Error>
{
	match config_parser::parse(source)
	{
		Err(x) => Err(error!(undetermined).with_message(format!("error parsing configuration: {:?}",x))),
		Ok(Token::Value(value)) => Ok(value),
		Ok(other) => Err(error!(undetermined).with_message(format!("the configuration is not a value but {:?}",other))),
	}
}

/// Read and parse a configuration file.
pub fn load_configuration(path:&Path) -> Result<ConfigurationValue,Error>
{
	let mut file=File::open(path).map_err(|e|error!(could_not_open_file,path.to_path_buf(),e))?;
	let mut contents = String::new();
	file.read_to_string(&mut contents).map_err(|e|error!(could_not_open_file,path.to_path_buf(),e))?;
	parse_configuration(&contents).map_err(|e|{
		let message=e.message.unwrap_or_default();
		error!(could_not_parse_file,path.to_path_buf()).with_message(message)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn parse_network()
	{
		let source="Network{ topology: Ring{routers:6}, routing: Ring{escape_virtual_channel:1}, ordered_vnets:[0,2], random_seed: 3, legend_name:\"ring\", }";
		let cv = parse_configuration(source).expect("should parse");
		assert_eq!(cv.object_name(),Some("Network"));
		if let ConfigurationValue::Object(_,ref pairs) = cv
		{
			assert_eq!(pairs.len(),5);
			assert_eq!(pairs[0].1.object_name(),Some("Ring"));
			assert_eq!(pairs[2].1.as_usize_list().expect("list"),vec![0,2]);
			assert_eq!(pairs[4].1.as_str().expect("literal"),"ring");
		}
		else
		{
			panic!("not an object");
		}
	}
	#[test]
	fn comments_and_trailing_commas()
	{
		let source="[ 1, //first\n 2.5, /* second */ true, false, XY, ]";
		let cv = parse_configuration(source).expect("should parse");
		let list = cv.as_array().expect("array");
		assert_eq!(list.len(),5);
		assert_eq!(list[0].as_usize().expect("number"),1);
		assert!(list[1].as_usize().is_err());
		assert!(list[2].as_bool().expect("bool"));
		assert_eq!(list[4],ConfigurationValue::Object("XY".to_string(),vec![]));
	}
	#[test]
	fn negative_is_not_usize()
	{
		assert!(ConfigurationValue::Number(-1.0).as_usize().is_err());
		assert_eq!(ConfigurationValue::Number(-1.0).as_i32().expect("i32"),-1);
	}
	#[test]
	fn parse_single_object()
	{
		let cv = parse_configuration("Ring{routers:4}").expect("should parse");
		assert_eq!(cv.object_name(),Some("Ring"));
	}
	#[test]
	fn seeds_are_integers()
	{
		use rand::Rng;
		assert!(ConfigurationValue::Number(3.5).as_rng().is_err());
		assert!(ConfigurationValue::Literal("7".to_string()).as_rng().is_err());
		let mut a = ConfigurationValue::Number(7.0).as_rng().expect("seed");
		let mut b = ConfigurationValue::Number(7.0).as_rng().expect("seed");
		let first:Vec<u64> = (0..8).map(|_|a.gen()).collect();
		let second:Vec<u64> = (0..8).map(|_|b.gen()).collect();
		assert_eq!(first,second);
	}
}
