/*!

Deterministic strategies: the routing table itself and the dimension order routings of meshes and rings.

*/

use ::rand::rngs::StdRng;

use crate::match_object;
use super::prelude::*;

///Route every packet by the weighted table, as if it were for this router.
#[derive(Debug)]
pub struct TableRouting
{
}

impl RoutingStrategy for TableRouting
{
	fn outport_compute(&self, request:&RoutingRequest, unit:&UnitTables, router:&dyn RouterContext, rng:&mut StdRng) -> Result<OutportSelection,Error>
	{
		unit.lookup_routing_table(request.route,router,rng)
	}
}

impl TableRouting
{
	pub fn new(arg:StrategyBuilderArgument) -> Result<TableRouting,Error>
	{
		match_object!(arg.cv,"Table",_value);
		Ok(TableRouting{})
	}
}

/**
Dimension order in a 2D mesh. First along the row (East/West) and then along the column (North/South).
The inbound direction must be coherent with having followed XY until here; otherwise it panics.
**/
#[derive(Debug)]
pub struct XY
{
}

impl RoutingStrategy for XY
{
	fn outport_compute(&self, request:&RoutingRequest, unit:&UnitTables, router:&dyn RouterContext, _rng:&mut StdRng) -> Result<OutportSelection,Error>
	{
		use PortDirection::*;
		let extents = router.extents();
		let (my_x,my_y) = extents.mesh_coordinates(router.router_index());
		let (dest_x,dest_y) = extents.mesh_coordinates(request.route.destination_router);
		let inport = request.inport_direction;
		let direction = if my_x != dest_x
		{
			if dest_x > my_x
			{
				assert!(inport==Local || inport==West,"XY leaving East but arrived from {}",inport);
				East
			}
			else
			{
				assert!(inport==Local || inport==East,"XY leaving West but arrived from {}",inport);
				West
			}
		}
		else if my_y != dest_y
		{
			if dest_y > my_y
			{
				assert!(inport!=North,"XY leaving North but arrived from North");
				North
			}
			else
			{
				assert!(inport!=South,"XY leaving South but arrived from South");
				South
			}
		}
		else
		{
			panic!("XY routing a packet for router {} at router {} with no hops left",request.route.destination_router,router.router_index());
		};
		unit.outport(direction)
	}
}

impl XY
{
	pub fn new(arg:StrategyBuilderArgument) -> Result<XY,Error>
	{
		match_object!(arg.cv,"XY",_value);
		Ok(XY{})
	}
}

///Dimension order in a 3D mesh: X, then Y, then Z.
#[derive(Debug)]
pub struct DOR3D
{
}

impl RoutingStrategy for DOR3D
{
	fn outport_compute(&self, request:&RoutingRequest, unit:&UnitTables, router:&dyn RouterContext, _rng:&mut StdRng) -> Result<OutportSelection,Error>
	{
		use PortDirection::*;
		let [dx,dy,dz] = router.extents().cube_deltas(router.router_index(),request.route.destination_router);
		let direction = if dx != 0
		{
			if dx>0 { East } else { West }
		}
		else if dy != 0
		{
			if dy>0 { North } else { South }
		}
		else if dz != 0
		{
			if dz>0 { Up } else { Down }
		}
		else
		{
			panic!("DOR3D routing a packet for router {} at router {} with no hops left",request.route.destination_router,router.router_index());
		};
		unit.outport(direction)
	}
}

impl DOR3D
{
	pub fn new(arg:StrategyBuilderArgument) -> Result<DOR3D,Error>
	{
		match_object!(arg.cv,"DOR3D",_value);
		Ok(DOR3D{})
	}
}

/**
Shortest direction in a ring of `routers` routers, where Clockwise goes from `i` to `i+1`. Ties go Clockwise.
The packet keeps its virtual channel, except when crossing the dateline: leaving Clockwise the router `routers-1` or Counterclockwise the router 0 moves it into `escape_virtual_channel`.
Once in the escape channel the packet stays there, so the cyclic dependency is broken.
**/
#[derive(Debug)]
pub struct Ring
{
	escape_virtual_channel: usize,
}

impl RoutingStrategy for Ring
{
	fn outport_compute(&self, request:&RoutingRequest, unit:&UnitTables, router:&dyn RouterContext, _rng:&mut StdRng) -> Result<OutportSelection,Error>
	{
		let n = router.extents().routers;
		let current = router.router_index();
		let target = request.route.destination_router;
		let clockwise_distance = (target + n - current) % n;
		let counterclockwise_distance = (current + n - target) % n;
		let direction = if clockwise_distance <= counterclockwise_distance { PortDirection::Clockwise } else { PortDirection::Counterclockwise };
		let dateline = match direction
		{
			PortDirection::Clockwise => current == n-1,
			_ => current == 0,
		};
		let virtual_channel = if dateline { self.escape_virtual_channel } else { request.in_virtual_channel };
		Ok(OutportSelection::with_virtual_channel(unit.outports.port(direction)?,virtual_channel))
	}
}

impl Ring
{
	pub fn new(arg:StrategyBuilderArgument) -> Result<Ring,Error>
	{
		let mut escape_virtual_channel = 1;
		match_object!(arg.cv,"Ring",value,
			"escape_virtual_channel" => escape_virtual_channel = value.as_usize()?,
		);
		Ok(Ring{
			escape_virtual_channel,
		})
	}
}
