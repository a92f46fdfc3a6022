/*!

This module is for managing errors in the code of the routing unit. To avoid invoking `panic!` in favor of a more graceful exit. Cases that should never happen can be kept as `panic!`.

A routing unit that cannot route a packet reports it as an `Error`. The caller is expected to stop the simulation, since such errors mean that the topology or its configuration is inconsistent.

Instead of `expect` or `unwrap_or_else` try
* `map_err` like in `.map_err(|e|error!(could_not_open_file,path.to_path_buf(),e))?;`
* `ok_or_else` like in `.ok_or_else( ||error!(unregistered_direction,direction) )?;`

Instead of `panic!` try
* Return an error. E.g., by `return Err( error!(no_route,vnet) );`

*/

use std::fmt::{Display,Formatter};
use std::path::PathBuf;

use crate::config_parser::ConfigurationValue;
use crate::routing::PortDirection;

/// The main Error class to be used in each `Result(Whatever,Error)`.
/// It contains the code source of the error and its kind.
/// An arbitrary `String` message can be optionally attached.
#[derive(Debug)]
pub struct Error
{
	pub source_location: SourceLocation,
	pub kind: ErrorKind,
	pub message: Option<String>,
}

/// A source code location where an error occurred.
/// Contains the values of the macros `std::{file,line,column}`.
#[derive(Debug)]
pub struct SourceLocation
{
	pub file: &'static str,
	pub line: u32,
	pub column: u32,
}

#[derive(Debug)]
pub enum ErrorKind
{
	/// A configuration value has not the expected shape.
	IllFormedConfiguration{
		value: ConfigurationValue,
	},
	CouldNotOpenFile{
		filepath: PathBuf,
		error: std::io::Error,
	},
	CouldNotParseFile{
		filepath: PathBuf,
	},
	/// The routing table has no link towards the destination for this vnet.
	NoRoute{
		vnet: usize,
	},
	/// None of the directions offered to the adaptive selector has an outport.
	NoAdaptiveOutport,
	/// A direction was requested that was never wired in this router.
	UnregisteredDirection{
		direction: PortDirection,
	},
	/// A routing strategy that is only a template was invoked.
	UnimplementedStrategy{
		name: String,
	},
	/// The strategy could not produce a valid outport.
	InvalidRoute,
	/// Some argument is out of range.
	BadArgument,
	/// Any other error. Better to add new types than to use this thing.
	Undetermined,
}

// source_location!()
#[macro_export]
macro_rules! source_location{
	() => {
		$crate::error::SourceLocation{
			file: file!(),
			line: line!(),
			column: column!(),
		}
	}
}

/// Build an `Error` of the given kind at the current source location.
/// `error!(no_route,vnet)` expands into `Error::no_route(source_location!(),vnet)`.
#[macro_export]
macro_rules! error{
	($kind:ident) => {{
		$crate::error::Error::$kind( $crate::source_location!() )
	}};
	($kind:ident, $($args:expr),* ) => {{
		$crate::error::Error::$kind( $crate::source_location!(), $($args),* )
	}};
}

use ErrorKind::*;

impl Error
{
	pub fn new(source_location:SourceLocation, kind:ErrorKind) -> Error
	{
		Error{
			source_location,
			kind,
			message:None,
		}
	}
	pub fn with_message(mut self,message:String) -> Error
	{
		self.message=Some(message);
		self
	}
	pub fn ill_formed_configuration(source_location:SourceLocation,value:ConfigurationValue)->Error
	{
		Error::new(source_location,IllFormedConfiguration{value})
	}
	pub fn could_not_open_file(source_location:SourceLocation,filepath:PathBuf,error:std::io::Error)->Error
	{
		Error::new(source_location,CouldNotOpenFile{filepath,error})
	}
	pub fn could_not_parse_file(source_location:SourceLocation,filepath:PathBuf)->Error
	{
		Error::new(source_location,CouldNotParseFile{filepath})
	}
	pub fn no_route(source_location:SourceLocation,vnet:usize)->Error
	{
		Error::new(source_location,NoRoute{vnet})
	}
	pub fn no_adaptive_outport(source_location:SourceLocation)->Error
	{
		Error::new(source_location,NoAdaptiveOutport)
	}
	pub fn unregistered_direction(source_location:SourceLocation,direction:PortDirection)->Error
	{
		Error::new(source_location,UnregisteredDirection{direction})
	}
	pub fn unimplemented_strategy(source_location:SourceLocation,name:String)->Error
	{
		Error::new(source_location,UnimplementedStrategy{name})
	}
	pub fn invalid_route(source_location:SourceLocation)->Error
	{
		Error::new(source_location,InvalidRoute)
	}
	pub fn bad_argument(source_location:SourceLocation)->Error
	{
		Error::new(source_location,BadArgument)
	}
	pub fn undetermined(source_location:SourceLocation)->Error
	{
		Error::new(source_location,Undetermined)
	}
}


impl Display for Error
{
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::result::Result<(), std::fmt::Error>
	{
		let Error{source_location:location,kind,message} = self;
		writeln!(formatter,"Error at file {} at line {} column {}.",location.file,location.line,location.column)?;
		if let Some(text) = message
		{
			writeln!(formatter,"{}",text)?;
		}
		kind.fmt(formatter)?;
		Ok(())
	}
}

impl Display for ErrorKind
{
	fn fmt(&self, formatter: &mut Formatter<'_>) -> std::result::Result<(), std::fmt::Error>
	{
		match self
		{
			IllFormedConfiguration{value} =>
			{
				writeln!(formatter,"IllFormedConfiguration error: the following value could not be understood:\n{}",value)?;
			},
			CouldNotOpenFile{filepath,error} =>
			{
				writeln!(formatter,"CouldNotOpenFile error: The file {:?} could not be opened.\nio_error: {}",filepath,error)?;
			},
			CouldNotParseFile{filepath} =>
			{
				writeln!(formatter,"CouldNotParseFile error: The file {:?} could not be parsed.",filepath)?;
			},
			NoRoute{vnet} =>
			{
				writeln!(formatter,"NoRoute error: No route exists from this router for vnet {}.",vnet)?;
			},
			NoAdaptiveOutport =>
			{
				writeln!(formatter,"NoAdaptiveOutport error: adaptive routing found no valid outport among its candidates.")?;
			},
			UnregisteredDirection{direction} =>
			{
				writeln!(formatter,"UnregisteredDirection error: the direction {} has no port in this router.",direction)?;
			},
			UnimplementedStrategy{name} =>
			{
				writeln!(formatter,"UnimplementedStrategy error: the routing {} is a placeholder and has been executed. Plug a strategy for this topology.",name)?;
			},
			InvalidRoute =>
			{
				writeln!(formatter,"InvalidRoute error: the routing returned no outport.")?;
			},
			BadArgument =>
			{
				writeln!(formatter,"BadArgument error: some argument is out of range.")?;
			},
			Undetermined =>
			{
				writeln!(formatter,"Undetermined error: A generic error. The concrete error should be more specified.")?;
			},
		}
		Ok(())
	}
}
