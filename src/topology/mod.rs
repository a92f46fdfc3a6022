/*!

The topologies the routing units are placed in, and the [Network] that builds and fills them.

A topology only describes the links between routers. Each router has a single network interface, with the same index as the router, attached to its `Local` port.

see [`new_topology`](fn.new_topology.html) for the configuration syntax.

*/

pub mod mesh;
pub mod ring;
pub mod network;

use std::fmt::Debug;
use quantifiable_derive::Quantifiable;//the derive macro

use crate::config_parser::ConfigurationValue;
use crate::quantify::Quantifiable;
use crate::routing::{PortDirection,TopologyExtents};
use crate::Plugs;
use crate::error::*;

pub use self::mesh::Mesh;
pub use self::network::{Network,Hop};

///A link leaving a router.
#[derive(Clone,Copy,Debug,PartialEq,Eq,Quantifiable)]
pub struct Link
{
	///The direction of the outport. The packet arrives to the neighbour by the opposite direction.
	pub direction: PortDirection,
	pub neighbour: usize,
	///The weight given to the routing tables.
	pub weight: i32,
}

pub trait Topology : Quantifiable + Debug
{
	fn num_routers(&self) -> usize;
	///The sizes used by the routing strategies to compute coordinates.
	fn extents(&self) -> TopologyExtents;
	///The links leaving `router`, in the order their outports are numbered, starting at 1.
	fn links(&self, router:usize) -> Vec<Link>;
}

#[derive(Debug)]
pub struct TopologyBuilderArgument<'a>
{
	///A ConfigurationValue::Object defining the topology.
	pub cv: &'a ConfigurationValue,
	///The user defined plugs. In case the topology needs to create elements.
	pub plugs: &'a Plugs,
}

/**Build a new topology.

## Mesh

A mesh of up to three dimensions. See [Mesh].
```ignore
Mesh{
	rows: 4,
	columns: 4,
	depths: 2,
	x_weight: 1,
	y_weight: 2,
	z_weight: 3,
}
```

## Ring

A ring. All its links have the same weight.
```ignore
Ring{
	routers: 8,
	weight: 1,
}
```
**/
pub fn new_topology(arg:TopologyBuilderArgument) -> Result<Box<dyn Topology>,Error>
{
	if let &ConfigurationValue::Object(ref cv_name, ref _cv_pairs)=arg.cv
	{
		if let Some(builder) = arg.plugs.topologies.get(cv_name)
		{
			return Ok(builder(arg));
		}
		match cv_name.as_ref()
		{
			"Mesh" => Ok(Box::new(Mesh::new(arg)?)),
			"Ring" => Ok(Box::new(ring::Ring::new(arg)?)),
			_ => Err(arg.cv.ill(&format!("Unknown topology {}",cv_name))),
		}
	}
	else
	{
		Err(arg.cv.ill("Trying to create a topology from a non-Object"))
	}
}
