use quantifiable_derive::Quantifiable;//the derive macro

use crate::match_object;
use crate::routing::{PortDirection,TopologyExtents};
use crate::error::*;
use super::{Topology,Link,TopologyBuilderArgument};

/**
A ring of `routers` routers. Clockwise goes from `i` to `i+1 mod routers` and Counterclockwise from `i` to `i-1 mod routers`.

```ignore
Ring{
	routers: 8,
	weight: 1,//optional, the weight of every link
}
```
**/
#[derive(Debug,Quantifiable)]
pub struct Ring
{
	routers: usize,
	weight: i32,
}

impl Topology for Ring
{
	fn num_routers(&self) -> usize
	{
		self.routers
	}
	fn extents(&self) -> TopologyExtents
	{
		TopologyExtents{
			rows: 1,
			columns: self.routers,
			depths: 1,
			routers: self.routers,
		}
	}
	fn links(&self, router:usize) -> Vec<Link>
	{
		let n = self.routers;
		vec![
			Link{ direction:PortDirection::Clockwise, neighbour:(router+1)%n, weight:self.weight },
			Link{ direction:PortDirection::Counterclockwise, neighbour:(router+n-1)%n, weight:self.weight },
		]
	}
}

impl Ring
{
	pub fn new(arg:TopologyBuilderArgument) -> Result<Ring,Error>
	{
		let mut routers=None;
		let mut weight=1;
		match_object!(arg.cv,"Ring",value,
			"routers" => routers=Some(value.as_usize()?),
			"weight" => weight=value.as_i32()?,
		);
		let routers=routers.ok_or_else(||arg.cv.ill("There were no routers"))?;
		if routers<2
		{
			return Err(arg.cv.ill("A ring needs at least two routers"));
		}
		if weight<1
		{
			return Err(arg.cv.ill("Link weights must be positive"));
		}
		Ok(Ring{
			routers,
			weight,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Plugs;
	use crate::config_parser::ConfigurationValue;

	#[test]
	fn wraps_around()
	{
		let plugs = Plugs::default();
		let cv = ConfigurationValue::Object("Ring".to_string(),vec![("routers".to_string(),ConfigurationValue::Number(5.0))]);
		let ring = Ring::new(TopologyBuilderArgument{cv:&cv,plugs:&plugs}).expect("valid ring");
		let neighbours = |router:usize| ring.links(router).iter().map(|l|l.neighbour).collect::<Vec<usize>>();
		assert_eq!(neighbours(0),vec![1,4]);
		assert_eq!(neighbours(4),vec![0,3]);
		assert_eq!(ring.extents().routers,5);
		let cv = ConfigurationValue::Object("Ring".to_string(),vec![("routers".to_string(),ConfigurationValue::Number(1.0))]);
		assert!(Ring::new(TopologyBuilderArgument{cv:&cv,plugs:&plugs}).is_err());
	}
}
