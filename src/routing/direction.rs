/*!

Directions of the ports of a router and their bijection with port indices.

*/

use std::fmt::{Display,Formatter};
use std::str::FromStr;
use quantifiable_derive::Quantifiable;//the derive macro

use crate::error;
use crate::error::*;

///The symbolic direction of a port. `Local` is the port towards the network interfaces.
#[derive(Clone,Copy,Debug,PartialEq,Eq,PartialOrd,Ord,Hash,Quantifiable)]
pub enum PortDirection
{
	Local,
	North,
	South,
	East,
	West,
	Up,
	Down,
	Clockwise,
	Counterclockwise,
}

impl PortDirection
{
	pub const COUNT:usize = 9;
	pub const ALL:[PortDirection;PortDirection::COUNT] = [
		PortDirection::Local,
		PortDirection::North,
		PortDirection::South,
		PortDirection::East,
		PortDirection::West,
		PortDirection::Up,
		PortDirection::Down,
		PortDirection::Clockwise,
		PortDirection::Counterclockwise,
	];
	fn index(self) -> usize
	{
		self as usize
	}
	///The direction from which a packet arrives after leaving through `self`. E.g., leaving East it arrives by the West.
	pub fn opposite(self) -> PortDirection
	{
		use PortDirection::*;
		match self
		{
			Local => Local,
			North => South,
			South => North,
			East => West,
			West => East,
			Up => Down,
			Down => Up,
			Clockwise => Counterclockwise,
			Counterclockwise => Clockwise,
		}
	}
}

impl Display for PortDirection
{
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result
	{
		write!(f,"{:?}",self)
	}
}

impl FromStr for PortDirection
{
	type Err = Error;
	fn from_str(s:&str) -> Result<PortDirection,Error>
	{
		PortDirection::ALL.iter().find(|d|format!("{:?}",d)==s).copied()
			.ok_or_else(||error!(bad_argument).with_message(format!("unknown port direction {}",s)))
	}
}

/**
The two bijections direction→port and port→direction, for either the inports or the outports of a router.
Filled once during the topology construction. Asking for a direction that was never added is an error.
**/
#[derive(Clone,Debug,Default,Quantifiable)]
pub struct DirectionRegistry
{
	///Indexed by `PortDirection as usize`.
	port_by_direction: Vec<Option<usize>>,
	///Indexed by port.
	direction_by_port: Vec<Option<PortDirection>>,
}

impl DirectionRegistry
{
	pub fn new() -> DirectionRegistry
	{
		DirectionRegistry{
			port_by_direction: vec![None;PortDirection::COUNT],
			direction_by_port: vec![],
		}
	}
	///Set `direction` to be port `port`. Re-adding a direction replaces its previous port.
	pub fn add(&mut self, direction:PortDirection, port:usize)
	{
		if let Some(old_port) = self.port_by_direction[direction.index()]
		{
			self.direction_by_port[old_port]=None;
		}
		if port>=self.direction_by_port.len()
		{
			self.direction_by_port.resize(port+1,None);
		}
		if let Some(old_direction) = self.direction_by_port[port]
		{
			self.port_by_direction[old_direction.index()]=None;
		}
		self.port_by_direction[direction.index()]=Some(port);
		self.direction_by_port[port]=Some(direction);
	}
	pub fn port(&self, direction:PortDirection) -> Result<usize,Error>
	{
		self.try_port(direction).ok_or_else(||error!(unregistered_direction,direction))
	}
	///Like `port` but returning None for unregistered directions.
	pub fn try_port(&self, direction:PortDirection) -> Option<usize>
	{
		self.port_by_direction.get(direction.index()).copied().flatten()
	}
	pub fn direction(&self, port:usize) -> Option<PortDirection>
	{
		self.direction_by_port.get(port).copied().flatten()
	}
	///The number of ports with a direction.
	pub fn len(&self) -> usize
	{
		self.direction_by_port.iter().filter(|d|d.is_some()).count()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	#[test]
	fn bijection()
	{
		let mut registry = DirectionRegistry::new();
		registry.add(PortDirection::Local,0);
		registry.add(PortDirection::East,1);
		registry.add(PortDirection::North,3);
		assert_eq!(registry.port(PortDirection::East).expect("East is registered"),1);
		assert_eq!(registry.direction(3),Some(PortDirection::North));
		assert_eq!(registry.direction(2),None);
		assert_eq!(registry.len(),3);
		match registry.port(PortDirection::Up)
		{
			Err(Error{kind:ErrorKind::UnregisteredDirection{direction:PortDirection::Up},..}) => (),
			x => panic!("expected an unregistered direction error, got {:?}",x),
		}
		//Moving East to another port releases the old one.
		registry.add(PortDirection::East,2);
		assert_eq!(registry.direction(1),None);
		assert_eq!(registry.try_port(PortDirection::East),Some(2));
	}
	#[test]
	fn names()
	{
		for direction in PortDirection::ALL.iter()
		{
			assert_eq!(direction.to_string().parse::<PortDirection>().expect("round name"),*direction);
			assert_eq!(direction.opposite().opposite(),*direction);
		}
		assert!("Sideways".parse::<PortDirection>().is_err());
	}
}
